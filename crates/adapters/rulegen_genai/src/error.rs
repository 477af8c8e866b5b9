//! Generator-specific error type wrapping genai errors.

use dealflow_domain::error::DealflowError;

/// Errors originating from the rule generation layer.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The chat call itself failed.
    #[error("chat completion error")]
    Chat(#[from] genai::Error),

    /// The model returned no text content at all.
    #[error("empty model reply")]
    EmptyReply,

    /// The reply text was not valid JSON.
    #[error("malformed model reply")]
    Malformed(#[from] serde_json::Error),
}

impl From<GeneratorError> for DealflowError {
    fn from(err: GeneratorError) -> Self {
        Self::Generation(Box::new(err))
    }
}
