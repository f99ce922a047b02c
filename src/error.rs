use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Unsupported payload: {0}")]
    Unsupported(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, HookError>;
