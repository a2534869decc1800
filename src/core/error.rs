//! Error taxonomy shared by states, operators and the repository.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantumError {
    /// Malformed or unnormalized state vector, or a non-square operator matrix.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("dimension mismatch: operator is {expected}x{expected}, state has {actual} amplitudes")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("a state with id '{id}' already exists")]
    DuplicateKey { id: String },

    #[error("no state with id '{id}'")]
    NotFound { id: String },

    /// Backing-store content does not match the record shape. `line` is 1-based.
    #[error("format error at line {line}: {reason}")]
    Format { line: u64, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, QuantumError>;

impl QuantumError {
    pub fn validation(message: impl Into<String>) -> Self {
        QuantumError::Validation(message.into())
    }

    pub fn duplicate(id: &str) -> Self {
        QuantumError::DuplicateKey { id: id.to_string() }
    }

    pub fn not_found(id: &str) -> Self {
        QuantumError::NotFound { id: id.to_string() }
    }

    pub fn format(line: u64, reason: impl Into<String>) -> Self {
        QuantumError::Format { line, reason: reason.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        QuantumError::Io { path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = QuantumError::validation("state vector must not be empty");
        assert_eq!(err.to_string(), "validation error: state vector must not be empty");
    }

    #[test]
    fn test_dimension_mismatch_error() {
        let err = QuantumError::DimensionMismatch { expected: 4, actual: 2 };
        assert_eq!(
            err.to_string(),
            "dimension mismatch: operator is 4x4, state has 2 amplitudes"
        );
    }

    #[test]
    fn test_key_errors() {
        assert_eq!(
            QuantumError::duplicate("q0").to_string(),
            "a state with id 'q0' already exists"
        );
        assert_eq!(QuantumError::not_found("q9").to_string(), "no state with id 'q9'");
    }

    #[test]
    fn test_format_error() {
        let err = QuantumError::format(3, "missing field 'vector'");
        assert_eq!(err.to_string(), "format error at line 3: missing field 'vector'");
    }
}
