//! A live comparison: points, multiplier, aggregator and displayed result.
//!
//! Every trigger (a point drag, a multiplier change, an explicit refresh)
//! runs one pass. A pass takes its [`PassToken`] first and then reads the
//! snapshot and multiplier, so the pass with the highest token has always
//! seen every write made before it started.

use std::sync::{PoisonError, RwLock};

use thiserror::Error;

use crate::aggregator::{ComputationAborted, RouteAggregator};
use crate::board::{ComparisonBoard, PassToken, Publication};
use crate::point::{Point, Snapshot};
use crate::route::Multiplier;
use crate::router::LegRouter;
use crate::store::{PointStore, PointStoreError};

/// Inputs captured for one pass before any routing starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassTicket {
    /// Sequence number of the pass.
    pub token: PassToken,
    /// Points the pass routes between.
    pub snapshot: Snapshot,
    /// Weight applied to the OVBA distance.
    pub multiplier: Multiplier,
}

/// What happened to the result of a completed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// The pass's comparison is now displayed.
    Applied {
        /// The pass that was applied.
        token: PassToken,
    },
    /// A newer pass finished first; this pass's comparison was dropped.
    Superseded {
        /// The discarded pass.
        token: PassToken,
        /// The displayed pass.
        latest: PassToken,
    },
}

/// Errors from [`ComparisonSession::move_point`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassError {
    /// The drag addressed a point that does not exist.
    #[error(transparent)]
    Store(#[from] PointStoreError),
    /// The recomputation failed; the previous result stays displayed.
    #[error(transparent)]
    Aborted(#[from] ComputationAborted),
}

/// Points, multiplier and displayed comparison for one map.
#[derive(Debug)]
pub struct ComparisonSession<R> {
    store: PointStore,
    aggregator: RouteAggregator<R>,
    board: ComparisonBoard,
    multiplier: RwLock<Multiplier>,
}

impl<R> ComparisonSession<R>
where
    R: LegRouter,
{
    /// Start a session at the default points with a multiplier of one.
    pub fn new(aggregator: RouteAggregator<R>) -> Self {
        Self::with_store(PointStore::default(), aggregator)
    }

    /// Start a session over an existing store.
    pub fn with_store(store: PointStore, aggregator: RouteAggregator<R>) -> Self {
        Self {
            store,
            aggregator,
            board: ComparisonBoard::default(),
            multiplier: RwLock::new(Multiplier::default()),
        }
    }

    /// The point store.
    pub const fn store(&self) -> &PointStore {
        &self.store
    }

    /// The displayed-result holder.
    pub const fn board(&self) -> &ComparisonBoard {
        &self.board
    }

    /// The aggregator used for every pass.
    pub const fn aggregator(&self) -> &RouteAggregator<R> {
        &self.aggregator
    }

    /// The multiplier the next pass will use.
    pub fn multiplier(&self) -> Multiplier {
        *self
            .multiplier
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the multiplier without starting a pass.
    pub fn store_multiplier(&self, multiplier: Multiplier) {
        *self
            .multiplier
            .write()
            .unwrap_or_else(PoisonError::into_inner) = multiplier;
    }

    /// Issue a token and capture the inputs of a new pass.
    pub fn begin_pass(&self) -> PassTicket {
        let token = self.board.begin_pass();
        PassTicket {
            token,
            snapshot: self.store.snapshot(),
            multiplier: self.multiplier(),
        }
    }

    /// Route the captured inputs and publish the comparison.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationAborted`] when a leg fails. The board keeps the
    /// previously displayed comparison.
    pub async fn run_pass(&self, ticket: PassTicket) -> Result<PassOutcome, ComputationAborted> {
        let PassTicket {
            token,
            snapshot,
            multiplier,
        } = ticket;
        log::debug!("pass {} started", token.sequence());

        let comparison = self
            .aggregator
            .compute_routes(&snapshot, multiplier)
            .await
            .inspect_err(|err| {
                log::warn!(
                    "pass {} aborted, keeping previous result: {err}",
                    token.sequence()
                );
            })?;

        match self.board.publish(token, comparison) {
            Publication::Applied => Ok(PassOutcome::Applied { token }),
            Publication::Superseded { latest } => {
                log::debug!(
                    "pass {} superseded by pass {}",
                    token.sequence(),
                    latest.sequence()
                );
                Ok(PassOutcome::Superseded { token, latest })
            }
        }
    }

    /// Recompute from the current points and multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationAborted`] when a leg fails.
    pub async fn refresh(&self) -> Result<PassOutcome, ComputationAborted> {
        self.run_pass(self.begin_pass()).await
    }

    /// Move the point at `index` and recompute.
    ///
    /// # Errors
    ///
    /// Returns [`PassError::Store`] for an invalid index, in which case no
    /// pass runs, or [`PassError::Aborted`] when a leg fails.
    pub async fn move_point(&self, index: usize, point: Point) -> Result<PassOutcome, PassError> {
        self.store.set(index, point)?;
        Ok(self.refresh().await?)
    }

    /// Change the multiplier and recompute.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationAborted`] when a leg fails.
    pub async fn set_multiplier(
        &self,
        multiplier: Multiplier,
    ) -> Result<PassOutcome, ComputationAborted> {
        self.store_multiplier(multiplier);
        self.refresh().await
    }
}
