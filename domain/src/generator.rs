use shared::types::Result;

/// Anything that turns a single user prompt into completion text.
///
/// Translation, sampling and summarization all go through this one
/// capability, so the pipeline can run against a deterministic stand-in.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}
