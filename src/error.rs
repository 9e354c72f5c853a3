//! Error types for scoretext.

use crate::property::PropertyId;
use std::fmt;

/// Result type alias for scoretext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for scoretext operations.
///
/// Malformed markup is never an error: the parser recovers by keeping
/// unknown tags as literal text. Column/row misuse is a caller bug and is
/// caught by debug assertions instead.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A property was given a value of the wrong kind.
    PropertyType {
        property: PropertyId,
        expected: &'static str,
    },
    /// Font sizes must be finite and positive.
    InvalidFontSize(f64),
    /// A linear text position does not address any (row, column).
    PositionOutOfRange { position: usize, len: usize },
    /// The property cannot be written through the property surface.
    ReadOnlyProperty(PropertyId),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PropertyType { property, expected } => {
                write!(f, "property {property:?} expects a {expected} value")
            }
            Self::InvalidFontSize(size) => write!(f, "invalid font size: {size}"),
            Self::PositionOutOfRange { position, len } => {
                write!(f, "position {position} out of range for text of length {len}")
            }
            Self::ReadOnlyProperty(property) => write!(f, "property {property:?} is read-only"),
        }
    }
}

impl std::error::Error for Error {}
