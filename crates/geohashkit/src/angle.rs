//! Folding of arbitrary angles onto the canonical latitude/longitude ranges.
//!
//! Longitude wraps around the globe; latitude reflects off the poles. Both
//! functions are total over finite input and return already-normalized values
//! unchanged, bit for bit.

use crate::error::{self, Error};

/// Full turn in degrees.
const TURN: f64 = 360.0;

/// Reject NaN and infinities before any arithmetic touches them.
fn require_finite(axis: &str, value: f64) -> error::Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidInput(format!(
            "{axis} must be a finite number, got {value}"
        )))
    }
}

/// Euclidean remainder by a full turn, always in `[0, 360)`.
///
/// `rem_euclid` may round up to exactly `360.0` for tiny negative inputs; that
/// case folds back to zero.
fn turn_remainder(value: f64) -> f64 {
    let r = value.rem_euclid(TURN);
    if r >= TURN { 0.0 } else { r }
}

/// Wrap a longitude onto `[-180, 180)`.
///
/// `190 → -170`, `-200 → 160`, and `180 → -180`: the eastern edge folds onto
/// the western one.
pub fn normalize_longitude(x: f64) -> error::Result<f64> {
    let x = require_finite("longitude", x)?;
    if (-180.0..180.0).contains(&x) {
        return Ok(x);
    }
    Ok(turn_remainder(x + 180.0) - 180.0)
}

/// Reflect a latitude onto `[-90, 90]`.
///
/// The value bounces off whichever pole it overshoots, as many times as
/// needed: `100 → 80`, `-95 → -85`, `280 → -80`.
pub fn normalize_latitude(y: f64) -> error::Result<f64> {
    let y = require_finite("latitude", y)?;
    if (-90.0..=90.0).contains(&y) {
        return Ok(y);
    }
    // Position along a 360° triangle wave measured from the south pole.
    let t = turn_remainder(y + 90.0);
    Ok(if t <= 180.0 { t - 90.0 } else { 270.0 - t })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitude_wraps() -> error::Result<()> {
        assert_eq!(normalize_longitude(190.0)?, -170.0);
        assert_eq!(normalize_longitude(-200.0)?, 160.0);
        assert_eq!(normalize_longitude(180.0)?, -180.0);
        assert_eq!(normalize_longitude(-180.0)?, -180.0);
        assert_eq!(normalize_longitude(540.0)?, -180.0);
        assert_eq!(normalize_longitude(720.0)?, 0.0);
        assert_eq!(normalize_longitude(-450.0)?, -90.0);
        assert!((normalize_longitude(-4320.4194)? + 0.4194).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn latitude_reflects() -> error::Result<()> {
        assert_eq!(normalize_latitude(-95.0)?, -85.0);
        assert_eq!(normalize_latitude(100.0)?, 80.0);
        assert_eq!(normalize_latitude(280.0)?, -80.0);
        assert_eq!(normalize_latitude(370.0)?, 10.0);
        assert_eq!(normalize_latitude(-450.0)?, -90.0);
        assert_eq!(normalize_latitude(180.0)?, 0.0);
        assert_eq!(normalize_latitude(-270.0)?, 90.0);
        Ok(())
    }

    #[test]
    fn normalized_input_is_untouched() -> error::Result<()> {
        for v in [-90.0, -37.7749, 0.0, 12.345_678_901, 90.0] {
            assert_eq!(normalize_latitude(v)?.to_bits(), f64::to_bits(v));
        }
        for v in [-180.0, -122.4194, 0.0, 179.999_999_9] {
            assert_eq!(normalize_longitude(v)?.to_bits(), f64::to_bits(v));
        }
        Ok(())
    }

    #[test]
    fn tiny_negative_overshoot_stays_in_range() -> error::Result<()> {
        assert_eq!(turn_remainder(-1e-20), 0.0);
        let lng = normalize_longitude(-180.000_000_000_001)?;
        assert!((-180.0..180.0).contains(&lng), "{lng}");
        let lat = normalize_latitude(-90.000_000_000_001)?;
        assert!((-90.0..=90.0).contains(&lat), "{lat}");
        Ok(())
    }

    #[test]
    fn non_finite_is_rejected() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(normalize_latitude(v), Err(Error::InvalidInput(_))));
            assert!(matches!(normalize_longitude(v), Err(Error::InvalidInput(_))));
        }
    }
}
