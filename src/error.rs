use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerdureError {
    #[error("Invalid bound: {0}")]
    InvalidBound(String),
    #[error("Ordering violation: {0}")]
    Ordering(String),
    #[error("Unknown bound: {0}")]
    UnknownBound(String),
    #[error("Structure error: {0}")]
    Structure(String),
}

pub type Result<T> = std::result::Result<T, PerdureError>;
