use std::result;

use thiserror::Error;

/// Errors raised by the geohash codec.
///
/// Every variant describes a caller-correctable input problem; none of them
/// is transient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A coordinate, length or geohash string failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A geohash contains a symbol outside the base-32 alphabet.
    #[error("invalid geohash character {0:?}")]
    InvalidCharacter(char),
    /// A neighbor order below 1 was requested.
    #[error("invalid neighbor order {0}: must be at least 1")]
    InvalidOrder(u32),
}

/// Result alias used throughout the crate.
pub type Result<T> = result::Result<T, Error>;
