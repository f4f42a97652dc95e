//! The immutable geohash value surfaced to callers.

use std::{
    fmt,
    str::{self, FromStr},
};

use crate::{
    alphabet::{self, BITS_PER_CHAR},
    codec::{self, Symbols},
    error::{self, Error},
    interval::BoundingBox,
    neighbors,
};

/// Length used when callers do not choose one; cells are roughly 15 cm wide.
pub const DEFAULT_LENGTH: usize = 11;

/// A validated, lowercase geohash.
///
/// A `Geohash` is never empty and only ever holds symbols from
/// [`ALPHABET`](crate::alphabet::ALPHABET). It is a plain value: "changing" it
/// means building a new one with [`Geohash::with_coordinates`] or by parsing.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Geohash(Symbols);

impl Geohash {
    /// Wrap symbols produced by the encoder.
    pub(crate) fn from_symbols(symbols: Symbols) -> Self {
        debug_assert!(!symbols.is_empty(), "geohash must not be empty");
        Self(symbols)
    }

    /// Parse and canonicalize a geohash string. Uppercase input is folded to
    /// lowercase.
    ///
    /// Empty strings and strings longer than [`MAX_LENGTH`](crate::MAX_LENGTH)
    /// are an [`Error::InvalidInput`].
    pub fn new(s: &str) -> error::Result<Self> {
        codec::require_length(s.chars().count())?;
        let symbols = s
            .chars()
            .map(|c| alphabet::char_to_bits(c).map(alphabet::symbol))
            .collect::<error::Result<Symbols>>()?;
        Ok(Self(symbols))
    }

    /// Encode a coordinate pair; see [`encode`](crate::encode).
    pub fn from_coordinates(latitude: f64, longitude: f64, length: usize) -> error::Result<Self> {
        codec::encode(latitude, longitude, length)
    }

    /// A new geohash for another coordinate pair.
    ///
    /// `self` is left untouched; bind the result to replace the value.
    pub fn with_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        length: usize,
    ) -> error::Result<Self> {
        Self::from_coordinates(latitude, longitude, length)
    }

    /// The geohash as a string slice.
    pub fn as_str(&self) -> &str {
        // Symbols are ASCII, so the check never fails.
        str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Number of characters; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The rectangle this geohash denotes.
    pub fn decode_to_interval(&self) -> BoundingBox {
        codec::deinterleave(&self.0)
    }

    /// Center of the cell as `(latitude, longitude)`.
    pub fn decode(&self) -> (f64, f64) {
        self.decode_to_interval().center()
    }

    /// The coarser geohash made of the first `len` characters.
    ///
    /// Its cell contains this one's.
    pub fn prefix(&self, len: usize) -> error::Result<Self> {
        if len == 0 || len > self.len() {
            return Err(Error::InvalidInput(format!(
                "prefix length must be within 1..={}, got {len}",
                self.len()
            )));
        }
        Ok(Self(self.0[..len].into()))
    }

    /// The interleaved bit stream, most significant bit first.
    ///
    /// Even positions are longitude bits, odd positions latitude bits.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().flat_map(|&symbol| {
            let value = alphabet::symbol_value(symbol);
            (0..BITS_PER_CHAR)
                .rev()
                .map(move |shift| (value >> shift) & 1 == 1)
        })
    }

    /// All cells within Chebyshev distance `order`; see
    /// [`neighbors`](crate::neighbors::neighbors).
    pub fn neighbors(&self, order: u32) -> error::Result<Vec<Self>> {
        neighbors::around(self, order)
    }

    /// Cells at exactly Chebyshev distance `order`; see
    /// [`ring`](crate::neighbors::ring).
    pub fn ring(&self, order: u32) -> error::Result<Vec<Self>> {
        neighbors::ring_around(self, order)
    }
}

impl Default for Geohash {
    /// The length-11 cell at the equator on the prime meridian.
    fn default() -> Self {
        Self::from_symbols(codec::interleave(0.0, 0.0, DEFAULT_LENGTH))
    }
}

impl FromStr for Geohash {
    type Err = Error;

    fn from_str(s: &str) -> error::Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Geohash {
    type Error = Error;

    fn try_from(s: &str) -> error::Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for Geohash {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Geohash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Geohash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Geohash({:?})", self.as_str())
    }
}

impl From<Geohash> for String {
    fn from(val: Geohash) -> Self {
        val.as_str().to_owned()
    }
}
