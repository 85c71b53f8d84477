//! Error types for encoder construction and model loading
//!
//! Per-residue problems (missing atoms, no partner, non-finite values) are
//! not errors: they only mask the affected residue. Everything here aborts
//! the whole call.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid model file: {0}")]
    ModelFormat(String),
    #[error("Configuration mismatch: {0}")]
    Configuration(String),
    #[error("Coordinate arrays differ in length: {name} has {found} entries, expected {expected}")]
    ShapeMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, EncoderError>;
