//! Solver failure taxonomy.
//!
//! Every variant is fatal for the solve that raised it: the strategy
//! keeps whatever action prefix it had reached and stays un-solved.

use thiserror::Error;

/// Errors that abort a strategy solve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A filter narrowed the candidate pool set to empty. Upstream data
    /// absence (a catalog missing a required protocol/asset pair)
    /// manifests here too.
    #[error("step {step} '{step_name}': filter '{filter}' left no candidate pools")]
    FilterExhausted {
        /// Zero-based index of the failing step.
        step: usize,
        /// Display name of the failing step.
        step_name: String,
        /// Name of the filter whose output was empty.
        filter: &'static str,
    },

    /// An optimizer failed to append exactly one action.
    #[error(
        "step {step} '{step_name}': optimizer '{optimizer}' returned {actual} actions, expected {expected}"
    )]
    OptimizerContract {
        /// Zero-based index of the failing step.
        step: usize,
        /// Display name of the failing step.
        step_name: String,
        /// Name of the offending optimizer.
        optimizer: &'static str,
        /// Action count the contract required.
        expected: usize,
        /// Action count the optimizer actually returned.
        actual: usize,
    },

    /// Solves are only meaningful for positive principal.
    #[error("principal must be positive, got {principal}")]
    NonPositivePrincipal {
        /// The invalid principal.
        principal: rust_decimal::Decimal,
    },

    /// A completed action references a pool with no usable rate.
    #[error("no usable rate for {protocol}/{pool}")]
    RateUnavailable {
        /// Protocol of the offending pool.
        protocol: String,
        /// Name of the offending pool.
        pool: String,
    },

    /// Leverage divides by the first action's rate; a zero-rate first
    /// leg has no defined amplification.
    #[error("first action's pool {protocol}/{pool} has a zero rate; leverage is undefined")]
    ZeroBaseRate {
        /// Protocol of the first action's pool.
        protocol: String,
        /// Name of the first action's pool.
        pool: String,
    },

    /// Aggregation needs at least one completed action.
    #[error("cannot aggregate an empty action list")]
    EmptyActions,
}
