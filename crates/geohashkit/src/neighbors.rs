//! Cells surrounding a geohash on the grid implied by its length.
//!
//! Candidates are found by stepping the cell center by whole cell sizes and
//! re-encoding at the same length. Crossing the antimeridian or a pole is left
//! to angle normalization, which can fold distinct offsets onto one cell; such
//! duplicates are dropped, keeping the first occurrence.

use std::collections::HashSet;

use tracing::trace;

use crate::{
    angle, codec,
    error::{self, Error},
    geohash::Geohash,
};

/// A grid displacement in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Rows toward the north; negative is south.
    pub lat: i64,
    /// Columns toward the east; negative is west.
    pub lng: i64,
}

impl Offset {
    /// Construct an offset.
    pub const fn new(lat: i64, lng: i64) -> Self {
        Self { lat, lng }
    }
}

/// Offsets at Chebyshev distance `order`, clockwise from the north-west
/// corner.
///
/// The walk runs east along the top row, south down the east column, west
/// along the bottom row and north up the west column, stopping just before
/// the start. It yields `8 * order` offsets, or nothing for order zero.
pub fn ring_offsets(order: u32) -> impl Iterator<Item = Offset> {
    let k = i64::from(order);
    let top = (-k..=k).map(move |lng| Offset::new(k, lng));
    let east = (-k..k).rev().map(move |lat| Offset::new(lat, k));
    let bottom = (-k..k).rev().map(move |lng| Offset::new(-k, lng));
    let west = (1 - k..k).map(move |lat| Offset::new(lat, -k));
    // Order zero would yield the lone center, which lies on no ring.
    top.chain(east)
        .chain(bottom)
        .chain(west)
        .take(8 * order as usize)
}

/// All cells within Chebyshev distance `order` of `geohash`.
///
/// Rings are listed from the innermost outward, each clockwise from its
/// north-west corner, so order 1 gives the familiar eight neighbors.
///
/// Near a pole or the antimeridian, distinct offsets can normalize onto the
/// same cell. Only the first occurrence is kept, and offsets that fold back
/// onto the input cell are dropped, so the input never appears and fewer than
/// `(2 * order + 1)² - 1` cells may come back.
pub fn neighbors(geohash: &str, order: u32) -> error::Result<Vec<Geohash>> {
    around(&geohash.parse()?, order)
}

/// Cells at exactly Chebyshev distance `order` of `geohash`, clockwise from
/// the north-west corner.
///
/// Duplicates and the input cell are dropped as in [`neighbors`].
pub fn ring(geohash: &str, order: u32) -> error::Result<Vec<Geohash>> {
    ring_around(&geohash.parse()?, order)
}

/// [`neighbors`] for an already-parsed geohash.
pub(crate) fn around(center: &Geohash, order: u32) -> error::Result<Vec<Geohash>> {
    require_order(order)?;
    let mut walk = Walk::new(center);
    let mut out = Vec::new();
    for k in 1..=order {
        walk.ring(k, &mut out)?;
    }
    Ok(out)
}

/// [`ring`] for an already-parsed geohash.
pub(crate) fn ring_around(center: &Geohash, order: u32) -> error::Result<Vec<Geohash>> {
    require_order(order)?;
    let mut out = Vec::new();
    Walk::new(center).ring(order, &mut out)?;
    Ok(out)
}

/// Reject order zero.
fn require_order(order: u32) -> error::Result<()> {
    if order == 0 {
        Err(Error::InvalidOrder(order))
    } else {
        Ok(())
    }
}

/// Traversal state shared by the rings of one query.
struct Walk<'a> {
    /// The cell being surrounded.
    center: &'a Geohash,
    /// Center of `center` as `(lat, lng)`.
    mid: (f64, f64),
    /// Cell size as `(lat, lng)`.
    step: (f64, f64),
    /// Cells already emitted, seeded with the center.
    seen: HashSet<Geohash>,
}

impl<'a> Walk<'a> {
    /// Start a traversal around `center`.
    fn new(center: &'a Geohash) -> Self {
        let bbox = center.decode_to_interval();
        Self {
            center,
            mid: bbox.center(),
            step: (bbox.height(), bbox.width()),
            seen: HashSet::from([center.clone()]),
        }
    }

    /// The cell reached by moving `offset` cells from the center.
    fn cell_at(&self, offset: Offset) -> error::Result<Geohash> {
        let lat = angle::normalize_latitude(self.mid.0 + offset.lat as f64 * self.step.0)?;
        let lng = angle::normalize_longitude(self.mid.1 + offset.lng as f64 * self.step.1)?;
        codec::encode(lat, lng, self.center.len())
    }

    /// Append the unseen cells of ring `order` to `out`.
    fn ring(&mut self, order: u32, out: &mut Vec<Geohash>) -> error::Result<()> {
        for offset in ring_offsets(order) {
            let cell = self.cell_at(offset)?;
            if self.seen.insert(cell.clone()) {
                out.push(cell);
            } else {
                trace!(center = %self.center, ?offset, %cell, "offset folds onto a known cell");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(cells: &[Geohash]) -> Vec<&str> {
        cells.iter().map(Geohash::as_str).collect()
    }

    #[test]
    fn first_ring_is_clockwise_from_north_west() {
        let offsets: Vec<(i64, i64)> = ring_offsets(1).map(|o| (o.lat, o.lng)).collect();
        assert_eq!(
            offsets,
            vec![
                (1, -1),
                (1, 0),
                (1, 1),
                (0, 1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
                (0, -1)
            ]
        );
    }

    #[test]
    fn ring_sizes() {
        assert_eq!(ring_offsets(0).count(), 0);
        for k in 1..6 {
            let offsets: Vec<Offset> = ring_offsets(k).collect();
            assert_eq!(offsets.len(), 8 * k as usize);
            let unique: HashSet<Offset> = offsets.iter().copied().collect();
            assert_eq!(unique.len(), offsets.len());
            let k = i64::from(k);
            assert!(
                offsets
                    .iter()
                    .all(|o| o.lat.abs().max(o.lng.abs()) == k)
            );
            assert_eq!(offsets[0], Offset::new(k, -k));
        }
    }

    #[test]
    fn san_francisco_ring() -> error::Result<()> {
        let cells = neighbors("9q8yyk8y", 1)?;
        assert_eq!(
            strs(&cells),
            [
                "9q8yyk8x", "9q8yyk8z", "9q8yyk9p", "9q8yyk9n", "9q8yyk9j", "9q8yyk8v",
                "9q8yyk8t", "9q8yyk8w"
            ]
        );
        Ok(())
    }

    #[test]
    fn second_ring_follows_first() -> error::Result<()> {
        let all = neighbors("9q8yyk8y", 2)?;
        assert_eq!(all.len(), 24);
        assert_eq!(all[..8], neighbors("9q8yyk8y", 1)?[..]);
        assert_eq!(
            strs(&all[8..]),
            strs(&ring("9q8yyk8y", 2)?),
        );
        assert_eq!(all[8].as_str(), "9q8yykb2");
        Ok(())
    }

    #[test]
    fn pole_collapses_duplicates() -> error::Result<()> {
        let cells = neighbors("upbp", 1)?;
        assert_eq!(strs(&cells), ["gzzz", "upbr", "upbq", "upbn", "gzzy"]);
        // The northern row reflects back onto the center and its east/west
        // neighbors, none of which reappear.
        assert!(!strs(&cells).contains(&"upbp"));
        assert_eq!(ring("upbp", 1)?, cells);
        Ok(())
    }

    #[test]
    fn seam_wraps_east() -> error::Result<()> {
        let cells = neighbors("xbpbpb", 1)?;
        assert_eq!(
            strs(&cells),
            ["xbpbp9", "xbpbpc", "800001", "800000", "2pbpbp", "rzzzzz", "rzzzzx", "xbpbp8"]
        );
        assert_eq!(cells[3].decode_to_interval().lng.low, -180.0);
        Ok(())
    }

    #[test]
    fn huge_order_ring_at_coarsest_length() -> error::Result<()> {
        // Every offset folds onto one of the 32 cells; nothing is pre-sized.
        let cells = ring("s", 64)?;
        assert!(cells.len() < 32);
        assert!(!strs(&cells).contains(&"s"));
        Ok(())
    }

    #[test]
    fn longest_geohash_has_eight_neighbors() -> error::Result<()> {
        let g = codec::encode(37.7749, -122.4194, codec::MAX_LENGTH)?;
        let cells = g.neighbors(1)?;
        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|c| c.len() == codec::MAX_LENGTH));
        Ok(())
    }

    #[test]
    fn order_zero_is_rejected() {
        assert_eq!(neighbors("9q8yyk8y", 0), Err(Error::InvalidOrder(0)));
        assert_eq!(ring("9q8yyk8y", 0), Err(Error::InvalidOrder(0)));
        assert!(matches!(neighbors("", 1), Err(Error::InvalidInput(_))));
    }
}
