use thiserror::Error;

/// Errors produced while constructing or running a descent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The function's parameters left their mathematically valid domain
    /// during descent, producing a non-finite cost or gradient.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// An operation that requires exactly two parameters was requested for
    /// a function with a different parameter count.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Trajectory-derived data was requested before any completed run.
    #[error("the gradient descent must be run first")]
    NotRun,

    /// Two vectors that must share a length did not.
    #[error("shape mismatch: expected length {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

impl Error {
    pub fn invalid_domain(msg: impl Into<String>) -> Self {
        Error::InvalidDomain(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Error::Unsupported(msg.into())
    }
}

/// Result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
