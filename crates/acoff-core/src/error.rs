//! Error types for the core library.

use thiserror::Error;

/// Errors surfaced by the host-facing boundary of the module.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The host has no instrument by this name.
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    /// The metadata provider failed to produce project metadata.
    #[error("metadata unavailable: {0}")]
    Metadata(String),

    /// Project metadata could not be assembled.
    #[error(transparent)]
    Model(#[from] acoff_model::ModelError),
}

/// Failure indicator of date parsing and formatting.
///
/// Callers decide what to show instead; nothing in the core treats a bad
/// date as fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("empty date")]
    Empty,
    #[error("unrecognized date: {0:?}")]
    Unparseable(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
