//! Strategy lifecycle and registry.
//!
//! A [`Strategy`] wraps a step pipeline into a per-product object with
//! observable state and a single `solve` write path. Strategies are
//! independent: nothing is shared between them, so a caller may solve
//! different strategies concurrently without locking. One strategy's
//! `solve` takes `&mut self` and must not race with itself.
//!
//! The [`StrategyRegistry`] owns the strategy book, solves everything
//! against one catalog snapshot, and exposes the ranked view consumers
//! display. A strategy that never reaches `Solved` is simply absent
//! from the ranking - callers treat every non-solved state uniformly
//! as "not ready".

pub mod shapes;

use tracing::{info, warn};

use crate::domain::{Action, Amount, DomainError, PoolCatalog, Rate, StrategyId};
use crate::solver::{self, Blended, SolveError, Step};

/// Lifecycle state of a strategy.
///
/// `Failed` is an explicit terminal state for an aborted solve.
/// Callers only ever distinguish `Solved` from everything else, so
/// ranking and display treat `Failed` exactly like `Solving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyStatus {
    /// Never solved.
    Unsolved,
    /// A solve is in flight.
    Solving,
    /// Last solve completed; actions and figures are current.
    Solved,
    /// Last solve aborted; the action list holds the completed prefix.
    Failed,
}

/// Whether the product is offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Offered and rankable.
    Live,
    /// Kept for existing positions, excluded from ranking.
    Retired,
}

/// A composite yield product: an ordered step pipeline plus the result
/// of its latest solve.
pub struct Strategy {
    id: StrategyId,
    steps: Vec<Step>,
    listing: Listing,
    status: StrategyStatus,
    actions: Vec<Action>,
    blended: Option<Blended>,
}

impl Strategy {
    /// Create a strategy from its pipeline.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptySteps` for an empty pipeline.
    pub fn try_new(id: StrategyId, steps: Vec<Step>) -> Result<Self, DomainError> {
        if steps.is_empty() {
            return Err(DomainError::EmptySteps);
        }
        Ok(Self {
            id,
            steps,
            listing: Listing::Live,
            status: StrategyStatus::Unsolved,
            actions: Vec::new(),
            blended: None,
        })
    }

    /// Mark the strategy retired (kept for existing positions only).
    #[must_use]
    pub fn retired(mut self) -> Self {
        self.listing = Listing::Retired;
        self
    }

    /// Strategy identity.
    #[must_use]
    pub const fn id(&self) -> &StrategyId {
        &self.id
    }

    /// The declared pipeline.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> StrategyStatus {
        self.status
    }

    /// Live/retired tag.
    #[must_use]
    pub const fn listing(&self) -> Listing {
        self.listing
    }

    /// Check if the latest solve completed.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status == StrategyStatus::Solved
    }

    /// The current action list. Complete after a successful solve; the
    /// completed prefix after an abort; empty before the first solve.
    ///
    /// The sum of these amounts is advisory (ranking and display); the
    /// authoritative position value is fetched independently, see
    /// [`crate::port::PositionValuer`].
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Aggregate figures from the latest successful solve.
    #[must_use]
    pub const fn blended(&self) -> Option<Blended> {
        self.blended
    }

    /// Blended net yield, when solved.
    #[must_use]
    pub fn net_yield(&self) -> Option<Rate> {
        self.blended.map(|b| b.net_yield())
    }

    /// Leverage ratio, when solved.
    #[must_use]
    pub fn leverage(&self) -> Option<rust_decimal::Decimal> {
        self.blended.map(|b| b.leverage())
    }

    /// Resolve the strategy against a catalog snapshot and a principal.
    ///
    /// The single write path for the strategy's actions, figures, and
    /// status. The action list is discarded and fully rebuilt on every
    /// call; solving twice on unchanged input yields an element-wise
    /// identical list.
    ///
    /// # Errors
    ///
    /// Returns the [`SolveError`] that aborted the run. The strategy
    /// keeps the completed action prefix and moves to
    /// [`StrategyStatus::Failed`].
    pub fn solve(
        &mut self,
        catalog: &PoolCatalog,
        principal: Amount,
    ) -> Result<Blended, SolveError> {
        self.status = StrategyStatus::Solving;
        self.actions.clear();
        self.blended = None;

        match solver::run(&self.steps, catalog, principal) {
            Ok(actions) => match solver::blend(&actions, principal) {
                Ok(blended) => {
                    self.actions = actions;
                    self.blended = Some(blended);
                    self.status = StrategyStatus::Solved;
                    Ok(blended)
                }
                Err(error) => {
                    self.actions = actions;
                    self.status = StrategyStatus::Failed;
                    Err(error)
                }
            },
            Err(abort) => {
                self.actions = abort.completed;
                self.status = StrategyStatus::Failed;
                Err(abort.error)
            }
        }
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("id", &self.id)
            .field("steps", &self.steps.len())
            .field("status", &self.status)
            .field("listing", &self.listing)
            .field("actions", &self.actions.len())
            .finish()
    }
}

/// The strategy book.
#[derive(Debug, Default)]
pub struct StrategyRegistry {
    strategies: Vec<Strategy>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy. Strategies are solved in registration order.
    pub fn register(&mut self, strategy: Strategy) {
        self.strategies.push(strategy);
    }

    /// All registered strategies.
    #[must_use]
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Number of registered strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Solve every strategy against one catalog snapshot.
    ///
    /// A failed solve is logged with the strategy's identity and the
    /// pass continues; the caller observes an un-solved strategy rather
    /// than an error. Returns the number of strategies solved.
    pub fn solve_all(&mut self, catalog: &PoolCatalog, principal: Amount) -> usize {
        let mut solved = 0;
        for strategy in &mut self.strategies {
            match strategy.solve(catalog, principal) {
                Ok(blended) => {
                    solved += 1;
                    info!(
                        strategy = %strategy.id(),
                        net_yield = %blended.net_yield(),
                        leverage = %blended.leverage(),
                        actions = strategy.actions().len(),
                        "strategy solved"
                    );
                }
                Err(error) => {
                    warn!(strategy = %strategy.id(), %error, "strategy solve aborted");
                }
            }
        }
        solved
    }

    /// Solved, live strategies ranked by net yield, best first.
    #[must_use]
    pub fn ranked(&self) -> Vec<&Strategy> {
        let mut ranked: Vec<&Strategy> = self
            .strategies
            .iter()
            .filter(|s| s.is_solved() && s.listing() == Listing::Live)
            .collect();
        ranked.sort_by(|a, b| b.net_yield().cmp(&a.net_yield()));
        ranked
    }
}
