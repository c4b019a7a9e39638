use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid date/time: {0}")]
    InvalidDateTime(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
