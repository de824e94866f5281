//! The solve pass.
//!
//! A single greedy traversal of the step pipeline: each step starts
//! from the *full* catalog, narrows it through the step's filter chain,
//! and lets the step's optimizer append exactly one action. There is no
//! reordering, backtracking, or multi-candidate search. A pipeline of N
//! steps therefore yields exactly N actions, or aborts with the prefix
//! it completed.

use tracing::debug;

use crate::domain::{Action, Amount, PoolCatalog};

use super::{SolveError, Step};

/// An aborted solve: the fatal error plus the action prefix produced by
/// the steps that completed strictly before the offending one.
#[derive(Debug, Clone)]
pub struct SolveAbort {
    /// Why the solve stopped.
    pub error: SolveError,
    /// Actions completed before the abort, in step order.
    pub completed: Vec<Action>,
}

/// Execute a step pipeline against a catalog and a principal.
///
/// Every filter receives the original principal and the actions
/// accumulated so far; the previous action's amount travels with the
/// action list. Step names are attached to the actions they produced.
///
/// # Errors
///
/// Returns [`SolveAbort`] on a non-positive principal, on filter
/// exhaustion, or on an optimizer breaking the exactly-one-action
/// contract.
pub fn run(
    steps: &[Step],
    catalog: &PoolCatalog,
    principal: Amount,
) -> Result<Vec<Action>, SolveAbort> {
    if principal <= Amount::ZERO {
        return Err(SolveAbort {
            error: SolveError::NonPositivePrincipal { principal },
            completed: Vec::new(),
        });
    }

    let mut actions: Vec<Action> = Vec::with_capacity(steps.len());

    for (index, step) in steps.iter().enumerate() {
        let mut candidates = catalog.pools().to_vec();

        for filter in step.filters() {
            candidates = filter.filter(&candidates, principal, &actions);
            if candidates.is_empty() {
                return Err(SolveAbort {
                    error: SolveError::FilterExhausted {
                        step: index,
                        step_name: step.name().to_string(),
                        filter: filter.name(),
                    },
                    completed: actions,
                });
            }
        }

        // A step with no filters still cannot optimize over nothing.
        if candidates.is_empty() {
            return Err(SolveAbort {
                error: SolveError::FilterExhausted {
                    step: index,
                    step_name: step.name().to_string(),
                    filter: "catalog",
                },
                completed: actions,
            });
        }

        debug!(
            step = index,
            step_name = step.name(),
            candidates = candidates.len(),
            "step candidates narrowed"
        );

        let before = actions.clone();
        let expected = before.len() + 1;
        actions = step.optimizer().optimize(&candidates, principal, actions);

        if actions.len() != expected {
            let actual = actions.len();
            return Err(SolveAbort {
                error: SolveError::OptimizerContract {
                    step: index,
                    step_name: step.name().to_string(),
                    optimizer: step.optimizer().name(),
                    expected,
                    actual,
                },
                completed: before,
            });
        }

        if let Some(action) = actions.last_mut() {
            action.set_step_name(step.name());
            debug!(
                step = index,
                step_name = step.name(),
                pool = %action.pool().name(),
                protocol = %action.pool().protocol(),
                amount = %action.amount(),
                is_deposit = action.is_deposit(),
                "action recorded"
            );
        }
    }

    Ok(actions)
}
