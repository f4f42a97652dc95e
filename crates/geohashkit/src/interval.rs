//! Closed intervals and the bounding boxes built from them.

/// Which coordinate a bisection step narrows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    /// East–west; always the first axis bisected.
    Longitude,
    /// North–south.
    Latitude,
}

impl Axis {
    /// The other axis.
    #[inline]
    pub(crate) fn flip(self) -> Self {
        match self {
            Self::Longitude => Self::Latitude,
            Self::Latitude => Self::Longitude,
        }
    }
}

/// One axis' bounding range, `low <= high`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    /// Inclusive lower bound.
    pub low: f64,
    /// Inclusive upper bound.
    pub high: f64,
}

impl Interval {
    /// The full latitude range.
    pub const LATITUDE: Self = Self::new(-90.0, 90.0);
    /// The full longitude range.
    pub const LONGITUDE: Self = Self::new(-180.0, 180.0);

    /// Create an interval. Debug builds assert `low <= high`.
    pub const fn new(low: f64, high: f64) -> Self {
        debug_assert!(low <= high);
        Self { low, high }
    }

    /// Midpoint of the interval.
    #[inline]
    pub fn mid(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Distance between the bounds.
    #[inline]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Whether `value` lies within the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Whether this interval is a subset of `other`.
    pub fn is_within(&self, other: &Self) -> bool {
        other.low <= self.low && self.high <= other.high
    }

    /// Keep the upper half when `upper` is set, the lower half otherwise.
    #[inline]
    pub fn narrow(&mut self, upper: bool) {
        let mid = self.mid();
        if upper {
            self.low = mid;
        } else {
            self.high = mid;
        }
    }

    /// Narrow toward `value` and return the bit that records the choice:
    /// `true` when `value >= mid`.
    #[inline]
    pub fn bisect_toward(&mut self, value: f64) -> bool {
        let upper = value >= self.mid();
        self.narrow(upper);
        upper
    }
}

/// The rectangle denoted by a geohash.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Latitude range, within `[-90, 90]`.
    pub lat: Interval,
    /// Longitude range, within `[-180, 180]`.
    pub lng: Interval,
}

impl Default for BoundingBox {
    /// The whole globe, before any bisection.
    fn default() -> Self {
        Self {
            lat: Interval::LATITUDE,
            lng: Interval::LONGITUDE,
        }
    }
}

impl BoundingBox {
    /// Center point as `(latitude, longitude)`.
    pub fn center(&self) -> (f64, f64) {
        (self.lat.mid(), self.lng.mid())
    }

    /// Latitude extent; the row step between vertically adjacent cells.
    pub fn height(&self) -> f64 {
        self.lat.width()
    }

    /// Longitude extent; the column step between horizontally adjacent cells.
    pub fn width(&self) -> f64 {
        self.lng.width()
    }

    /// Whether the point lies inside the box, edges included.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.lat.contains(latitude) && self.lng.contains(longitude)
    }

    /// Whether this box lies entirely inside `other`.
    pub fn is_within(&self, other: &Self) -> bool {
        self.lat.is_within(&other.lat) && self.lng.is_within(&other.lng)
    }

    /// Mutable access to the interval for `axis`.
    #[inline]
    pub(crate) fn axis_mut(&mut self, axis: Axis) -> &mut Interval {
        match axis {
            Axis::Longitude => &mut self.lng,
            Axis::Latitude => &mut self.lat,
        }
    }
}
