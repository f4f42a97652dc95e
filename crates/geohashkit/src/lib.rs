//! Geohash encoding, decoding and neighbor search.
//!
//! A geohash names a rectangle on the globe by recursively bisecting the
//! longitude and latitude ranges and spelling the recorded bits in a base-32
//! alphabet. Longer geohashes name smaller cells, and every prefix of a
//! geohash names a cell containing it.
//!
//! ```
//! # fn main() -> geohashkit::error::Result<()> {
//! let sf = geohashkit::encode(37.7749, -122.4194, 6)?;
//! assert_eq!(sf.as_str(), "9q8yyk");
//!
//! let bbox = geohashkit::decode_to_interval("9q8yyk")?;
//! assert!(bbox.contains(37.7749, -122.4194));
//!
//! let around = geohashkit::neighbors("9q8yyk", 1)?;
//! assert_eq!(around.len(), 8);
//! # Ok(())
//! # }
//! ```
//!
//! All operations are pure functions over plain values; nothing here holds
//! state or performs I/O.

/// The base-32 alphabet and its 5-bit mapping.
pub mod alphabet;
/// Latitude and longitude normalization.
pub mod angle;
/// Encoding and decoding by interleaved bisection.
mod codec;
/// Error types used across the crate.
pub mod error;
/// The `Geohash` value type.
mod geohash;
/// Intervals and bounding boxes.
pub mod interval;
/// Neighbor and ring enumeration.
pub mod neighbors;

pub use crate::{
    codec::{MAX_LENGTH, decode, decode_rounded, decode_to_interval, encode},
    geohash::{DEFAULT_LENGTH, Geohash},
    interval::{BoundingBox, Interval},
    neighbors::{neighbors, ring},
};
