//! Core types for the circuit workspace.

use std::fmt;

/// Spacing of the placement grid (pixels).
pub const GRID_SIZE: f64 = 20.0;

/// Pointer distance within which a component counts as hit (pixels).
pub const HIT_RADIUS: f64 = 30.0;

/// Horizontal distance from a component's centre to its wire terminal (pixels).
pub const TERMINAL_OFFSET: f64 = 40.0;

/// A unique identifier for a placed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// A unique identifier for a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireId(pub u64);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}", self.0)
    }
}

/// A point on the workspace canvas (pixels, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round both coordinates to the nearest grid line.
    pub fn snapped(&self) -> Self {
        Self {
            x: snap(self.x),
            y: snap(self.y),
        }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Snap a coordinate to the nearest multiple of [`GRID_SIZE`].
///
/// Halfway values round towards positive infinity, so `-10` snaps to `0`
/// and `10` to `20`.
pub fn snap(v: f64) -> f64 {
    (v / GRID_SIZE + 0.5).floor() * GRID_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap() {
        assert_eq!(snap(0.0), 0.0);
        assert_eq!(snap(9.0), 0.0);
        assert_eq!(snap(10.0), 20.0);
        assert_eq!(snap(253.0), 260.0);
        assert_eq!(Point::new(101.0, 189.0).snapped(), Point::new(100.0, 180.0));
    }

    #[test]
    fn test_snap_negative_halfway_rounds_up() {
        assert_eq!(snap(-10.0), 0.0);
        assert_eq!(snap(-11.0), -20.0);
        assert_eq!(snap(-30.0), -20.0);
        assert_eq!(snap(-31.0), -40.0);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
