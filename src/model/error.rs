//! Record construction errors.

use thiserror::Error;

/// Errors raised when a record or key is built from invalid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A key attribute was empty or whitespace only.
    #[error("{0} must not be empty")]
    EmptyKey(&'static str),
}
