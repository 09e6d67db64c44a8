use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable point in the plane.
///
/// Equality and hashing use the exact coordinate values, so a `Point` can key
/// a map. `-0.0` and `0.0` compare equal (as they do for `f64`) and hash the same.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Plane Euclidean distance to `other`.
    ///
    /// Computed with `hypot`, so gaps between very large coordinates do not
    /// overflow to infinity.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn key(&self) -> (u64, u64) {
        (canonical_bits(self.x), canonical_bits(self.y))
    }
}

// Adding 0.0 turns -0.0 into 0.0 and leaves every other value alone.
#[inline]
fn canonical_bits(v: f64) -> u64 {
    (v + 0.0).to_bits()
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_is_by_value() {
        assert_eq!(Point::new(1.5, -2.0), Point::new(1.5, -2.0));
        assert_ne!(Point::new(1.5, -2.0), Point::new(-2.0, 1.5));
    }

    #[test]
    fn signed_zero_is_one_key() {
        let mut set = HashSet::new();
        set.insert(Point::new(0.0, 0.0));
        set.insert(Point::new(-0.0, 0.0));
        set.insert(Point::new(0.0, -0.0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn euclidean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn distance_survives_huge_coordinates() {
        let d = Point::new(0.0, 0.0).distance(&Point::new(3e200, 4e200));
        assert!(d.is_finite());
        assert!((d - 5e200).abs() / 5e200 < 1e-12);
        assert_eq!(Point::new(1e160, 0.0).distance(&Point::new(2e154, 0.0)), 1e160 - 2e154);
    }

    #[test]
    fn display_matches_edge_list_format() {
        assert_eq!(Point::new(3.0, -4.0).to_string(), "[3,-4]");
        assert_eq!(Point::new(0.5, 2.0).to_string(), "[0.5,2]");
    }

    #[test]
    fn finiteness() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }
}
