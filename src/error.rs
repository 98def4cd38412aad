//! Error types for header generation.

use std::fmt;
use std::io;

/// Errors produced while generating a config header.
///
/// Capability resolution itself is total and never fails; errors arise only
/// when validating identity strings destined for C string literals, or from
/// the filesystem when writing the output.
#[derive(Debug)]
pub enum Error {
    /// A required identity field was empty.
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },
    /// An identity string contains a character that cannot appear in a C
    /// string literal without escaping.
    InvalidStringLiteral {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
    /// Filesystem error while writing the generated header.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyField { field } => {
                write!(f, "{field} must not be empty")
            }
            Error::InvalidStringLiteral { field, value } => {
                write!(
                    f,
                    "{field} {value:?} contains a character that cannot appear in a C string literal"
                )
            }
            Error::Io(err) => write!(f, "failed to write header: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Result type for header generation.
pub type Result<T> = std::result::Result<T, Error>;
