//! Per-leg routes, per-ordering paths and the comparison between them.

use geo::LineString;
use thiserror::Error;

use crate::leg::Ordering;

/// Road-following route for one leg.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegRoute {
    /// Vertices in travel order.
    pub geometry: LineString<f64>,
    /// Road distance in metres.
    pub distance_m: f64,
}

impl LegRoute {
    /// Build a leg route from its vertices and distance.
    ///
    /// # Examples
    ///
    /// ```
    /// use geo::Coord;
    /// use routediff_core::LegRoute;
    ///
    /// let route = LegRoute::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }], 150.0);
    /// assert_eq!(route.geometry.0.len(), 2);
    /// ```
    #[must_use]
    pub fn new(geometry: impl Into<LineString<f64>>, distance_m: f64) -> Self {
        Self {
            geometry: geometry.into(),
            distance_m,
        }
    }
}

/// Aggregated geometry and distance for one [`Ordering`].
///
/// Leg geometries are concatenated as-is: the shared vertex at each join
/// appears twice.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathResult {
    ordering: Ordering,
    geometry: LineString<f64>,
    distance_m: f64,
}

impl PathResult {
    /// Concatenate `legs` in order and sum their distances.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "path distance is the sum of leg distances"
    )]
    pub fn from_legs<I>(ordering: Ordering, legs: I) -> Self
    where
        I: IntoIterator<Item = LegRoute>,
    {
        let mut vertices = Vec::new();
        let mut distance_m = 0.0;
        for leg in legs {
            vertices.extend(leg.geometry.0);
            distance_m += leg.distance_m;
        }
        Self {
            ordering,
            geometry: LineString::new(vertices),
            distance_m,
        }
    }

    /// Ordering this path follows.
    #[must_use]
    pub const fn ordering(&self) -> Ordering {
        self.ordering
    }

    /// Concatenated vertices of every leg.
    #[must_use]
    pub const fn geometry(&self) -> &LineString<f64> {
        &self.geometry
    }

    /// Total road distance in metres.
    #[must_use]
    pub const fn distance_m(&self) -> f64 {
        self.distance_m
    }
}

/// Errors returned by [`Multiplier::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MultiplierError {
    /// The value was below zero.
    #[error("multiplier must not be negative, got {value}")]
    Negative {
        /// The rejected value.
        value: f64,
    },
    /// The value was NaN or infinite.
    #[error("multiplier must be finite, got {value}")]
    NotFinite {
        /// The rejected value.
        value: f64,
    },
}

/// Weight applied to the OVBA distance in the differential.
///
/// Always finite and non-negative. Defaults to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Multiplier(f64);

impl Multiplier {
    /// The neutral weight.
    pub const ONE: Self = Self(1.0);

    /// Validate and wrap `value`.
    ///
    /// # Errors
    ///
    /// Returns [`MultiplierError`] when `value` is negative, NaN or infinite.
    pub fn new(value: f64) -> Result<Self, MultiplierError> {
        if !value.is_finite() {
            return Err(MultiplierError::NotFinite { value });
        }
        if value < 0.0 {
            return Err(MultiplierError::Negative { value });
        }
        Ok(Self(value))
    }

    /// The wrapped value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f64> for Multiplier {
    type Error = MultiplierError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Multiplier> for f64 {
    fn from(multiplier: Multiplier) -> Self {
        multiplier.0
    }
}

/// `obab_distance_m - multiplier × ovba_distance_m`, sign preserved.
///
/// # Examples
///
/// ```
/// use routediff_core::{Multiplier, differential};
///
/// let double = Multiplier::new(2.0)?;
/// assert_eq!(differential(1200.0, 1000.0, Multiplier::ONE), 200.0);
/// assert_eq!(differential(1200.0, 1000.0, double), -800.0);
/// # Ok::<(), routediff_core::MultiplierError>(())
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the differential is a weighted difference of distances"
)]
pub fn differential(obab_distance_m: f64, ovba_distance_m: f64, multiplier: Multiplier) -> f64 {
    obab_distance_m - multiplier.get() * ovba_distance_m
}

/// Both paths of one pass together with their differential.
///
/// A comparison is only ever built whole, so its distances always match the
/// geometry they are paired with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Comparison {
    ovba: PathResult,
    obab: PathResult,
    multiplier: Multiplier,
    differential_m: f64,
}

impl Comparison {
    /// Combine the two paths and compute the differential.
    #[must_use]
    pub fn new(ovba: PathResult, obab: PathResult, multiplier: Multiplier) -> Self {
        let differential_m = differential(obab.distance_m, ovba.distance_m, multiplier);
        Self {
            ovba,
            obab,
            multiplier,
            differential_m,
        }
    }

    /// The OVBA path.
    #[must_use]
    pub const fn ovba(&self) -> &PathResult {
        &self.ovba
    }

    /// The OBAB path.
    #[must_use]
    pub const fn obab(&self) -> &PathResult {
        &self.obab
    }

    /// The path for `ordering`.
    #[must_use]
    pub const fn path(&self, ordering: Ordering) -> &PathResult {
        match ordering {
            Ordering::Ovba => &self.ovba,
            Ordering::Obab => &self.obab,
        }
    }

    /// Weight that was applied to the OVBA distance.
    #[must_use]
    pub const fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// `obab - multiplier × ovba` in metres; positive means OBAB is heavier.
    #[must_use]
    pub const fn differential_m(&self) -> f64 {
        self.differential_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    fn straight(from: (f64, f64), to: (f64, f64), distance_m: f64) -> LegRoute {
        LegRoute::new(
            vec![
                Coord {
                    x: from.0,
                    y: from.1,
                },
                Coord { x: to.0, y: to.1 },
            ],
            distance_m,
        )
    }

    #[rstest]
    fn path_sums_leg_distances() {
        let path = PathResult::from_legs(
            Ordering::Ovba,
            [
                straight((0.0, 0.0), (1.0, 1.0), 500.0),
                straight((1.0, 1.0), (2.0, 2.0), 700.0),
                straight((2.0, 2.0), (3.0, 3.0), 300.0),
            ],
        );
        assert_eq!(path.distance_m(), 1500.0);
        assert_eq!(path.ordering(), Ordering::Ovba);
    }

    #[rstest]
    fn path_keeps_duplicate_join_vertices() {
        let path = PathResult::from_legs(
            Ordering::Ovba,
            [
                straight((0.0, 0.0), (1.0, 1.0), 1.0),
                straight((1.0, 1.0), (2.0, 2.0), 1.0),
                straight((2.0, 2.0), (3.0, 3.0), 1.0),
            ],
        );
        let expected: Vec<Coord> = [
            (0.0, 0.0),
            (1.0, 1.0),
            (1.0, 1.0),
            (2.0, 2.0),
            (2.0, 2.0),
            (3.0, 3.0),
        ]
        .into_iter()
        .map(|(x, y)| Coord { x, y })
        .collect();
        assert_eq!(path.geometry().0, expected);
    }

    #[rstest]
    #[case(1.0, 200.0)]
    #[case(2.0, -800.0)]
    #[case(0.0, 1200.0)]
    fn differential_scales_ovba(#[case] weight: f64, #[case] expected: f64) {
        let multiplier = Multiplier::new(weight).expect("valid multiplier");
        assert_eq!(differential(1200.0, 1000.0, multiplier), expected);
    }

    #[rstest]
    fn comparison_pairs_differential_with_paths() {
        let ovba = PathResult::from_legs(Ordering::Ovba, [straight((0.0, 0.0), (1.0, 0.0), 1000.0)]);
        let obab = PathResult::from_legs(Ordering::Obab, [straight((0.0, 0.0), (0.0, 1.0), 1200.0)]);
        let comparison = Comparison::new(ovba.clone(), obab.clone(), Multiplier::ONE);

        assert_eq!(comparison.path(Ordering::Ovba), &ovba);
        assert_eq!(comparison.path(Ordering::Obab), &obab);
        assert_eq!(comparison.differential_m(), 200.0);
    }

    #[rstest]
    #[case(-0.5)]
    #[case(-f64::MIN_POSITIVE)]
    fn multiplier_rejects_negative(#[case] value: f64) {
        assert!(matches!(
            Multiplier::new(value),
            Err(MultiplierError::Negative { .. })
        ));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn multiplier_rejects_non_finite(#[case] value: f64) {
        assert!(matches!(
            Multiplier::new(value),
            Err(MultiplierError::NotFinite { .. })
        ));
    }

    #[rstest]
    fn multiplier_defaults_to_one() {
        assert_eq!(Multiplier::default().get(), 1.0);
    }
}
