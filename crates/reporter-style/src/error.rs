use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("unknown style mode: {0} (expected ansi, plain or html)")]
    UnknownMode(String),
}
