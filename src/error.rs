//! Error types for test-instance generation
//!
//! Every variant is fatal: generation is a one-shot build step, so callers
//! abort the run and regenerate from scratch on the next invocation.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for generator operations
#[derive(Debug, Error)]
pub enum GenError {
    /// Wrong number of positional command-line arguments
    #[error("Expected {expected} arguments but got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    /// Element type missing from the type registry
    #[error("Unknown element type: {0}")]
    UnknownType(String),

    /// Shape preset missing from the shape catalog
    #[error("Unknown shape preset: {0}")]
    UnknownShape(String),

    /// Semiring identifier not of the form `<monoid>_<binop>`
    #[error("Invalid semiring '{0}': expected <monoid>_<binop>")]
    InvalidSemiring(String),

    /// Operator tag rejected by the strict operator policy
    #[error("Unknown {kind} operator: {tag}")]
    UnknownOperator { kind: &'static str, tag: String },

    /// Invalid argument error
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Harness template file is absent
    #[error("Missing harness template: {}", path.display())]
    MissingTemplate { path: PathBuf },

    /// I/O failure on a generated file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for generator operations
pub type GenResult<T> = Result<T, GenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GenError::ArgumentCount {
            expected: 7,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Expected 7 arguments but got 3");

        let err = GenError::UnknownType("int16_t".to_string());
        assert_eq!(err.to_string(), "Unknown element type: int16_t");

        let err = GenError::MissingTemplate {
            path: PathBuf::from("src/test/cuda_tests_template.cpp"),
        };
        assert!(err.to_string().contains("cuda_tests_template.cpp"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error;

        let err = GenError::io(
            "out.hpp",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("I/O error on out.hpp"));
        assert!(err.source().is_some());
    }
}
