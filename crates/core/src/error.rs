use thiserror::Error;

use crate::prompt::PromptError;

/// Failures of the gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("LLM provider error: {0}")]
    Provider(String),

    #[error("OCR failed: {0}")]
    Recognition(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),
}
