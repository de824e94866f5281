//! The step-based strategy resolution engine.
//!
//! A strategy's pipeline is an ordered list of [`Step`]s; each step
//! narrows the pool catalog through a chain of [`PoolFilter`]s and then
//! lets one [`Optimizer`] append exactly one action. The engine runs
//! the pipeline as a single greedy pass - no reordering, backtracking,
//! or multi-candidate search - and the aggregator reduces the completed
//! action list to one blended net yield and a leverage ratio.
//!
//! Filters and optimizers are single-method capability traits so
//! concrete strategies assemble their pipelines as data, not as
//! subclasses.

pub mod aggregate;
mod engine;
mod error;
pub mod filters;
pub mod optimizers;
mod schedule;

pub use aggregate::{blend, Blended};
pub use engine::{run, SolveAbort};
pub use error::SolveError;
pub use schedule::{LoopSchedule, DEFAULT_AMOUNT_SCALE};

use crate::domain::{Action, Amount, Pool};

/// Narrows a candidate pool set.
///
/// Filters are pure and synchronous: they never mutate their inputs,
/// they only ever narrow (an empty input yields an empty output), and
/// they receive the *original* principal plus the actions accumulated
/// so far - the previous action's amount is available through the
/// action list, not as a separate running value.
pub trait PoolFilter: Send + Sync {
    /// Name used in solve diagnostics.
    fn name(&self) -> &'static str;

    /// Return the subset of `pools` that survive this filter.
    fn filter(&self, pools: &[Pool], principal: Amount, actions: &[Action]) -> Vec<Pool>;
}

/// Picks one pool from a fully-filtered candidate set and appends
/// exactly one action.
///
/// The contract is `optimize(pools, principal, actions) ->
/// actions ++ [new_action]`; the engine aborts the strategy when the
/// returned list did not grow by exactly one.
pub trait Optimizer: Send + Sync {
    /// Name used in solve diagnostics.
    fn name(&self) -> &'static str;

    /// Append the chosen action to `actions` and return the new list.
    fn optimize(&self, pools: &[Pool], principal: Amount, actions: Vec<Action>) -> Vec<Action>;
}

/// One named unit of a strategy's pipeline: a filter chain plus one
/// optimizer. Declared at strategy construction time and immutable
/// thereafter.
pub struct Step {
    name: String,
    filters: Vec<Box<dyn PoolFilter>>,
    optimizer: Box<dyn Optimizer>,
}

impl Step {
    /// Create a step.
    pub fn new(
        name: impl Into<String>,
        filters: Vec<Box<dyn PoolFilter>>,
        optimizer: Box<dyn Optimizer>,
    ) -> Self {
        Self {
            name: name.into(),
            filters,
            optimizer,
        }
    }

    /// Display name, attached to the action this step produces.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filters in application order.
    #[must_use]
    pub fn filters(&self) -> &[Box<dyn PoolFilter>] {
        &self.filters
    }

    /// The step's optimizer.
    #[must_use]
    pub fn optimizer(&self) -> &dyn Optimizer {
        self.optimizer.as_ref()
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("filters", &self.filters.iter().map(|x| x.name()).collect::<Vec<_>>())
            .field("optimizer", &self.optimizer.name())
            .finish()
    }
}
