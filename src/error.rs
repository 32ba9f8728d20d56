use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Internal engine fault: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
