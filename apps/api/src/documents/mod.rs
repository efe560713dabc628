// Document upload: turns an uploaded PDF into plain text for the summarizer UI.

pub mod extractor;
pub mod handlers;

pub use extractor::{ExtractError, PdfTextExtractor, TextExtractor};
