//! Mutable storage for the four map points.
//!
//! [`PointStore`] is the only shared mutable state between recomputation
//! passes. Drag events write single points with [`PointStore::set`]; each pass
//! reads all four at once with [`PointStore::snapshot`].

use std::sync::{PoisonError, RwLock};

use thiserror::Error;

use crate::point::{DEFAULT_POINTS, POINT_COUNT, Point, PointRole, Snapshot};

/// Errors returned by [`PointStore`] index-based accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PointStoreError {
    /// The index does not name one of the four points.
    #[error("point index {index} is out of range (expected 0..{POINT_COUNT})")]
    OutOfRange {
        /// The rejected index.
        index: usize,
    },
}

/// Thread-safe holder of the four point positions.
///
/// Writes replace a single coordinate atomically and readers always observe
/// a consistent set of four points.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use routediff_core::{PointStore, PointStoreError};
///
/// let store = PointStore::default();
/// store.set(1, Coord { x: 4.93, y: 45.72 })?;
/// assert_eq!(store.get(1)?, Coord { x: 4.93, y: 45.72 });
/// assert!(store.get(4).is_err());
/// # Ok::<(), PointStoreError>(())
/// ```
#[derive(Debug)]
pub struct PointStore {
    points: RwLock<[Point; POINT_COUNT]>,
}

impl Default for PointStore {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS)
    }
}

impl PointStore {
    /// Create a store holding `points` in index order.
    #[must_use]
    pub const fn new(points: [Point; POINT_COUNT]) -> Self {
        Self {
            points: RwLock::new(points),
        }
    }

    /// Return the point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PointStoreError::OutOfRange`] when `index` is not in `0..4`.
    pub fn get(&self, index: usize) -> Result<Point, PointStoreError> {
        let role = role_for(index)?;
        Ok(self.point(role))
    }

    /// Replace the point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PointStoreError::OutOfRange`] when `index` is not in `0..4`.
    pub fn set(&self, index: usize, point: Point) -> Result<(), PointStoreError> {
        let role = role_for(index)?;
        self.set_point(role, point);
        Ok(())
    }

    /// Return the point playing `role`.
    #[must_use]
    pub fn point(&self, role: PointRole) -> Point {
        self.snapshot().point(role)
    }

    /// Replace the point playing `role`.
    pub fn set_point(&self, role: PointRole, point: Point) {
        let mut points = self.points.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = points.get_mut(role.index()) {
            *slot = point;
        }
    }

    /// Copy all four points at one instant.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let points = self.points.read().unwrap_or_else(PoisonError::into_inner);
        Snapshot::new(*points)
    }
}

fn role_for(index: usize) -> Result<PointRole, PointStoreError> {
    PointRole::from_index(index).ok_or(PointStoreError::OutOfRange { index })
}
