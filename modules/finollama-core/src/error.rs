use ai_client::AiError;
use finollama_archive::FetchError;
use finollama_common::ValidationError;
use thiserror::Error;

/// Problems with the model's reply text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No JSON found in the content.")]
    NoJsonFound,

    #[error("Error decoding JSON: {0}")]
    JsonDecode(String),

    #[error("JSON does not match the expected fact-check shape: {0}")]
    Schema(String),
}

/// Everything that can stop one explore request. `Display` is what the user sees.
#[derive(Error, Debug)]
pub enum ExploreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error fetching content: {0}")]
    Fetch(#[from] FetchError),

    #[error("Error fetching facts from the language model: {0}")]
    Llm(#[from] AiError),

    #[error("Could not read the fact check: {0}")]
    Parse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Store(anyhow::Error),
}
