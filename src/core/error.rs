//! Typed errors for the exclusion filters
//!
//! Every failure of the decision core is reported as an [`ExcludeError`] so
//! the traversal engine can tell a caller mistake from a broken type system.
//!
//! # Error Categories
//!
//! - [`ExcludeError::InvalidArgument`]: a required input is missing or empty
//! - [`ExcludeError::InvariantViolation`]: the supertype chain of a type is
//!   cyclic or implausibly deep
//! - [`ExcludeError::InvalidState`]: the registry was modified after it was sealed
//!
//! # Example
//!
//! ```rust,ignore
//! use this_validation_exclude::prelude::*;
//!
//! match TypeNameExcludeFilter::new("") {
//!     Err(ExcludeError::InvalidArgument { argument, .. }) => {
//!         println!("bad argument: {}", argument);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// Result alias used throughout the decision core
pub type Result<T> = std::result::Result<T, ExcludeError>;

/// Errors raised while building filters or deciding exclusion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExcludeError {
    /// A required input was missing or empty
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    /// The supertype chain could not be walked to its root
    #[error("Type system invariant violated: {0}")]
    InvariantViolation(String),

    /// The operation is not allowed in the current lifecycle phase
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ExcludeError {
    /// Shorthand for an [`ExcludeError::InvalidArgument`]
    pub fn invalid_argument(argument: &str, message: impl Into<String>) -> Self {
        ExcludeError::InvalidArgument {
            argument: argument.to_string(),
            message: message.into(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ExcludeError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            ExcludeError::InvariantViolation(_) => "INVARIANT_VIOLATION",
            ExcludeError::InvalidState(_) => "INVALID_STATE",
        }
    }

    /// Whether the error points at a broken environment rather than a bad call
    ///
    /// Fatal errors should abort startup; retrying reproduces them.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExcludeError::InvariantViolation(_))
    }
}
