//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty or whitespace only
    Empty { field: &'static str },

    /// Value outside the accepted range
    OutOfRange { field: &'static str, value: i64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::OutOfRange { field, value } => {
                write!(f, "{} value {} is out of range", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
