use std::sync::Arc;

use crate::config::Config;
use crate::documents::TextExtractor;
use crate::llm_client::ChatCompleter;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when `OPENAI_API_KEY` is unset; summarize requests then fail with a
    /// configuration error instead of the process refusing to start.
    pub llm: Option<Arc<dyn ChatCompleter>>,
    /// Pluggable document text extractor. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
}

#[cfg(test)]
impl AppState {
    pub fn for_tests(llm: Option<Arc<dyn ChatCompleter>>) -> Self {
        AppState {
            config: Config::for_tests(),
            llm,
            extractor: Arc::new(crate::documents::PdfTextExtractor),
        }
    }
}
