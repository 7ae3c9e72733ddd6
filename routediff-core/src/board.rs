//! The currently displayed comparison and the pass sequence.
//!
//! Passes may finish out of order. Each pass takes a [`PassToken`] before it
//! reads its snapshot, and [`ComparisonBoard::publish`] refuses results from
//! a pass older than the one already displayed.

use std::sync::atomic::{self, AtomicU64};
use std::sync::{Mutex, PoisonError};

use crate::route::Comparison;

/// Sequence number identifying one recomputation pass.
///
/// Tokens are strictly increasing in the order they are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassToken(u64);

impl PassToken {
    /// Position of the pass in issue order, starting at zero.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Result of [`ComparisonBoard::publish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publication {
    /// The comparison is now displayed.
    Applied,
    /// A newer pass is already displayed; the comparison was dropped.
    Superseded {
        /// Token of the displayed pass.
        latest: PassToken,
    },
}

/// A comparison together with the pass that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedComparison {
    /// Pass that produced the comparison.
    pub token: PassToken,
    /// The displayed comparison.
    pub comparison: Comparison,
}

/// Holder of the displayed comparison.
///
/// # Examples
///
/// ```
/// use routediff_core::{ComparisonBoard, Publication};
/// # use routediff_core::{Comparison, Multiplier, Ordering, PathResult};
/// # let comparison = Comparison::new(
/// #     PathResult::from_legs(Ordering::Ovba, []),
/// #     PathResult::from_legs(Ordering::Obab, []),
/// #     Multiplier::ONE,
/// # );
///
/// let board = ComparisonBoard::default();
/// let older = board.begin_pass();
/// let newer = board.begin_pass();
///
/// assert_eq!(board.publish(newer, comparison.clone()), Publication::Applied);
/// assert_eq!(
///     board.publish(older, comparison),
///     Publication::Superseded { latest: newer }
/// );
/// ```
#[derive(Debug, Default)]
pub struct ComparisonBoard {
    next_sequence: AtomicU64,
    displayed: Mutex<Option<DisplayedComparison>>,
}

impl ComparisonBoard {
    /// Issue the token for a new pass.
    pub fn begin_pass(&self) -> PassToken {
        PassToken(self.next_sequence.fetch_add(1, atomic::Ordering::Relaxed))
    }

    /// Display `comparison` unless a newer pass is already displayed.
    pub fn publish(&self, token: PassToken, comparison: Comparison) -> Publication {
        let mut displayed = self
            .displayed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = displayed.as_ref()
            && current.token > token
        {
            return Publication::Superseded {
                latest: current.token,
            };
        }
        *displayed = Some(DisplayedComparison { token, comparison });
        Publication::Applied
    }

    /// The displayed comparison, if any pass has completed.
    #[must_use]
    pub fn current(&self) -> Option<DisplayedComparison> {
        self.displayed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
