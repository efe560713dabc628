// Contract summarization: prompt building, the two-pass model call, tolerant JSON
// extraction and normalization into `Summary`.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod extract;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod prompts;
