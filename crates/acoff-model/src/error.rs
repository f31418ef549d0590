use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid event id: {0:?}")]
    InvalidEventId(String),
    #[error("unknown form {0}")]
    UnknownForm(String),
    #[error("duplicate field {0}")]
    DuplicateField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
