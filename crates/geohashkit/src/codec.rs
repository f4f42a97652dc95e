//! Bit-interleaved bisection between coordinates and geohash strings.
//!
//! Each character carries five bits. Bits alternate between the longitude and
//! latitude axes, starting with longitude, and the axis flips after every bit
//! rather than every character. Odd-length geohashes therefore carry one more
//! longitude bit than latitude bit, and their cells are not square.

use smallvec::SmallVec;

use crate::{
    alphabet::{self, BITS_PER_CHAR},
    angle,
    error::{self, Error},
    geohash::Geohash,
    interval::{Axis, BoundingBox, Interval},
};

/// Inline storage for geohash symbols; standard lengths never hit the heap.
pub(crate) type Symbols = SmallVec<[u8; 12]>;

/// Decimal places beyond which rounding no longer changes an `f64` angle.
const MAX_DECIMAL_PLACES: i32 = 15;

/// Longest geohash accepted, in characters.
///
/// At 20 characters every cell is still wider than the spacing of `f64`
/// values on both axes. One more character and cells beyond 128 degrees of
/// longitude collapse: their midpoint rounds onto a bound.
pub const MAX_LENGTH: usize = 20;

/// Reject lengths outside `1..=MAX_LENGTH`.
pub(crate) fn require_length(length: usize) -> error::Result<()> {
    if (1..=MAX_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "geohash length must be within 1..={MAX_LENGTH}, got {length}"
        )))
    }
}

/// Encode a coordinate pair into a geohash of `length` characters.
///
/// Both angles are normalized first, so `encode(100.0, 190.0, 5)` equals
/// `encode(80.0, -170.0, 5)`. A length outside `1..=`[`MAX_LENGTH`] or a
/// non-finite coordinate is an [`Error::InvalidInput`].
pub fn encode(latitude: f64, longitude: f64, length: usize) -> error::Result<Geohash> {
    let lat = angle::normalize_latitude(latitude)?;
    let lng = angle::normalize_longitude(longitude)?;
    require_length(length)?;
    Ok(Geohash::from_symbols(interleave(lat, lng, length)))
}

/// Decode a geohash into the bounding box it denotes.
///
/// Uppercase input is accepted. An empty string or one longer than
/// [`MAX_LENGTH`] is an [`Error::InvalidInput`]; a symbol outside the alphabet is an
/// [`Error::InvalidCharacter`].
pub fn decode_to_interval(geohash: &str) -> error::Result<BoundingBox> {
    Ok(geohash.parse::<Geohash>()?.decode_to_interval())
}

/// Decode a geohash to the `(latitude, longitude)` center of its cell.
///
/// The result is a point estimate: it lies inside the encoded cell but is not
/// the coordinate that was originally encoded.
pub fn decode(geohash: &str) -> error::Result<(f64, f64)> {
    Ok(decode_to_interval(geohash)?.center())
}

/// Decode a geohash to its center, rounded to the decimal places the cell
/// size justifies.
///
/// Intended for display. Rounding is half-up, and the rounded point may sit
/// just outside a very coarse cell.
pub fn decode_rounded(geohash: &str) -> error::Result<(f64, f64)> {
    let bbox = decode_to_interval(geohash)?;
    Ok((round_to_cell(&bbox.lat), round_to_cell(&bbox.lng)))
}

/// Run the encoder's bisection over normalized coordinates.
pub(crate) fn interleave(lat: f64, lng: f64, length: usize) -> Symbols {
    let mut bbox = BoundingBox::default();
    let mut axis = Axis::Longitude;
    let mut symbols = Symbols::with_capacity(length);
    for _ in 0..length {
        let mut chunk = 0u8;
        for _ in 0..BITS_PER_CHAR {
            let coord = match axis {
                Axis::Longitude => lng,
                Axis::Latitude => lat,
            };
            let bit = bbox.axis_mut(axis).bisect_toward(coord);
            chunk = (chunk << 1) | u8::from(bit);
            axis = axis.flip();
        }
        symbols.push(alphabet::symbol(chunk));
    }
    symbols
}

/// Replay the bisection recorded by validated symbols.
pub(crate) fn deinterleave(symbols: &[u8]) -> BoundingBox {
    let mut bbox = BoundingBox::default();
    let mut axis = Axis::Longitude;
    for &symbol in symbols {
        let value = alphabet::symbol_value(symbol);
        for shift in (0..BITS_PER_CHAR).rev() {
            bbox.axis_mut(axis).narrow((value >> shift) & 1 == 1);
            axis = axis.flip();
        }
    }
    bbox
}

/// Round an interval's midpoint half-up to `max(1, -round(log10(width))) - 1`
/// decimal places.
fn round_to_cell(interval: &Interval) -> f64 {
    let mid = interval.mid();
    let magnitude = (interval.width().log10() + 0.5).floor();
    let places = (-magnitude).max(1.0) - 1.0;
    if places > f64::from(MAX_DECIMAL_PLACES) {
        return mid;
    }
    let scale = 10f64.powi(places as i32);
    (mid * scale + 0.5).floor() / scale
}
