// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid strategy parameters: {0}")]
    InvalidParameters(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Failed to parse strategy parameters: {0}")]
    Params(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
