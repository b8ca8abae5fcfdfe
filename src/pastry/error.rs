use thiserror::Error;

#[derive(Error, Debug)]
pub enum PastryError {
    #[error("Index out of bounds: {0}")]
    OutOfBounds(String),

    #[error("Payload is not valid UTF-8")]
    InvalidEncoding,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, PastryError>;
