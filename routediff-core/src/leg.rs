//! Legs, orderings and travel modes.
//!
//! Each [`Ordering`] is decomposed into three [`Leg`]s over the points of a
//! [`Snapshot`]. The decomposition is fixed:
//!
//! | Ordering | Legs                          |
//! |----------|-------------------------------|
//! | OVBA     | `O → A`, `A → V`, `V → B`     |
//! | OBAB     | `O → V`, `V → A`, `A → B`     |

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::point::{Point, PointRole, Snapshot};

/// Number of legs in every ordering.
pub const LEGS_PER_ORDERING: usize = 3;

/// One point-to-point routing request.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// Where the leg starts.
    pub start: Point,
    /// Where the leg ends.
    pub end: Point,
}

impl Leg {
    /// Build a leg from `start` to `end`.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// A named three-leg visiting sequence over the four points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Ordering {
    /// `O → A → V → B`, the baseline scaled by the multiplier.
    Ovba,
    /// `O → V → A → B`.
    Obab,
}

impl Ordering {
    /// Both orderings in request order.
    pub const ALL: [Self; 2] = [Self::Ovba, Self::Obab];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ovba => "OVBA",
            Self::Obab => "OBAB",
        }
    }

    /// The `(from, to)` roles of each leg, in travel order.
    #[must_use]
    pub const fn leg_roles(self) -> [(PointRole, PointRole); LEGS_PER_ORDERING] {
        use PointRole::{A, B, O, V};
        match self {
            Self::Ovba => [(O, A), (A, V), (V, B)],
            Self::Obab => [(O, V), (V, A), (A, B)],
        }
    }

    /// Resolve this ordering's legs against `snapshot`.
    ///
    /// # Examples
    ///
    /// ```
    /// use routediff_core::{Ordering, PointRole, Snapshot};
    ///
    /// let snapshot = Snapshot::default();
    /// let [first, ..] = Ordering::Ovba.legs(&snapshot);
    /// assert_eq!(first.start, snapshot.point(PointRole::O));
    /// assert_eq!(first.end, snapshot.point(PointRole::A));
    /// ```
    #[must_use]
    pub fn legs(self, snapshot: &Snapshot) -> [Leg; LEGS_PER_ORDERING] {
        self.leg_roles()
            .map(|(from, to)| Leg::new(snapshot.point(from), snapshot.point(to)))
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A leg tagged with where it sits in a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedLeg {
    /// Ordering the leg belongs to.
    pub ordering: Ordering,
    /// Zero-based position of the leg within its ordering.
    pub position: usize,
    /// Role of the start point.
    pub from: PointRole,
    /// Role of the end point.
    pub to: PointRole,
    /// Resolved coordinates.
    pub leg: Leg,
}

/// List the six legs of one pass: OVBA's three, then OBAB's three.
#[must_use]
pub fn plan_legs(snapshot: &Snapshot) -> Vec<PlannedLeg> {
    Ordering::ALL
        .into_iter()
        .flat_map(|ordering| {
            ordering
                .leg_roles()
                .into_iter()
                .enumerate()
                .map(move |(position, (from, to))| PlannedLeg {
                    ordering,
                    position,
                    from,
                    to,
                    leg: Leg::new(snapshot.point(from), snapshot.point(to)),
                })
        })
        .collect()
}

/// Travel mode sent with every leg request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TravelMode {
    /// Road vehicle routing.
    #[default]
    Car,
    /// Bicycle routing.
    Bike,
    /// Walking.
    Foot,
}

impl TravelMode {
    /// Identifier understood by routing services.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Bike => "bike",
            Self::Foot => "foot",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown travel mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown travel mode {0:?} (expected car, bike or foot)")]
pub struct ParseTravelModeError(pub String);

impl FromStr for TravelMode {
    type Err = ParseTravelModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "bike" => Ok(Self::Bike),
            "foot" => Ok(Self::Foot),
            _ => Err(ParseTravelModeError(s.to_owned())),
        }
    }
}
