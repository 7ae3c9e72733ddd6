//! Map points and the roles they play in a comparison.
//!
//! Four points are placed on the map. Each one is identified by a fixed index
//! that maps onto a [`PointRole`]: `0 = O`, `1 = V`, `2 = B`, `3 = A`.

use std::fmt;

use geo::Coord;

/// A WGS84 position: `x` is longitude and `y` is latitude, both in degrees.
pub type Point = Coord<f64>;

/// Number of points placed on the map.
pub const POINT_COUNT: usize = 4;

/// Starting positions used when no points are configured.
pub const DEFAULT_POINTS: [Point; POINT_COUNT] = [
    Coord {
        x: 4.920_240_905_185_659_5,
        y: 45.725_975_684_822_366,
    },
    Coord {
        x: 4.929_023_131_057_543,
        y: 45.723_670_828_730_87,
    },
    Coord {
        x: 4.924_762_893_150_509,
        y: 45.711_474_647_440_61,
    },
    Coord {
        x: 4.951_393_097_711_732,
        y: 45.712_654_385_849_55,
    },
];

/// The role a point plays, named after its map label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointRole {
    /// Point at index 0, where both orderings start.
    O,
    /// Point at index 1.
    V,
    /// Point at index 2.
    B,
    /// Point at index 3.
    A,
}

impl PointRole {
    /// Every role in index order.
    pub const ALL: [Self; POINT_COUNT] = [Self::O, Self::V, Self::B, Self::A];

    /// Index of this role within a [`Snapshot`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::O => 0,
            Self::V => 1,
            Self::B => 2,
            Self::A => 3,
        }
    }

    /// Resolve a role from its index, or `None` outside `0..4`.
    ///
    /// # Examples
    ///
    /// ```
    /// use routediff_core::PointRole;
    ///
    /// assert_eq!(PointRole::from_index(3), Some(PointRole::A));
    /// assert_eq!(PointRole::from_index(4), None);
    /// ```
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::O),
            1 => Some(Self::V),
            2 => Some(Self::B),
            3 => Some(Self::A),
            _ => None,
        }
    }

    /// Single-letter map label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::O => "O",
            Self::V => "V",
            Self::B => "B",
            Self::A => "A",
        }
    }
}

impl fmt::Display for PointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A consistent copy of all four points taken at one instant.
///
/// One snapshot is the unit of work for a recomputation pass: every leg of
/// the pass is derived from the same snapshot.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use routediff_core::{PointRole, Snapshot};
///
/// let snapshot = Snapshot::new([
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 1.0, y: 0.0 },
///     Coord { x: 2.0, y: 0.0 },
///     Coord { x: 3.0, y: 0.0 },
/// ]);
/// assert_eq!(snapshot.point(PointRole::B), Coord { x: 2.0, y: 0.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    points: [Point; POINT_COUNT],
}

impl Snapshot {
    /// Wrap four points given in index order.
    #[must_use]
    pub const fn new(points: [Point; POINT_COUNT]) -> Self {
        Self { points }
    }

    /// Position of the point playing `role`.
    #[must_use]
    pub const fn point(&self, role: PointRole) -> Point {
        let [o, v, b, a] = self.points;
        match role {
            PointRole::O => o,
            PointRole::V => v,
            PointRole::B => b,
            PointRole::A => a,
        }
    }

    /// All four points in index order.
    #[must_use]
    pub const fn points(&self) -> [Point; POINT_COUNT] {
        self.points
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS)
    }
}

impl From<[Point; POINT_COUNT]> for Snapshot {
    fn from(points: [Point; POINT_COUNT]) -> Self {
        Self::new(points)
    }
}

impl From<Snapshot> for [Point; POINT_COUNT] {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.points
    }
}
