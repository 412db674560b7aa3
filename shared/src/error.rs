//! Error taxonomy for the semantic map pipeline.
//!
//! Every variant is fatal: nothing in the pipeline retries or degrades.

/// Errors raised anywhere between the first request and the last rendered panel.
#[derive(Debug, thiserror::Error)]
pub enum SemanticMapError {
    /// Missing credential, missing font file, or a sample count that cannot
    /// feed the projection or the cluster count.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The generation endpoint failed, rate limited us, or returned an empty
    /// or malformed completion.
    #[error("Generation service error: {0}")]
    Service(String),

    /// Collected texts cannot be analysed (for example an empty vocabulary).
    #[error("Data error: {0}")]
    Data(String),

    /// Drawing a panel failed.
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SemanticMapError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service(_))
    }
}
