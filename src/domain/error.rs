//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors that validate
//! domain invariants.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// APRs are fractions and can never be negative.
    #[error("rate must be non-negative, got {rate}")]
    NegativeRate {
        /// The invalid rate that was provided.
        rate: rust_decimal::Decimal,
    },

    /// Collateral and borrow factors are fractions of face value.
    #[error("{field} must be within [0, 1], got {value}")]
    FactorOutOfRange {
        /// Which factor was invalid.
        field: &'static str,
        /// The invalid value that was provided.
        value: rust_decimal::Decimal,
    },

    /// TVL is a USD figure and can never be negative.
    #[error("tvl must be non-negative, got {tvl}")]
    NegativeTvl {
        /// The invalid TVL that was provided.
        tvl: rust_decimal::Decimal,
    },

    /// A pool is uniquely identified by (protocol, pool) within a catalog.
    #[error("duplicate pool {protocol}/{pool} in catalog")]
    DuplicatePool {
        /// The protocol half of the duplicate identity.
        protocol: String,
        /// The pool half of the duplicate identity.
        pool: String,
    },

    /// Action amounts must be positive to be executable.
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The invalid amount that was provided.
        amount: rust_decimal::Decimal,
    },

    /// Strategies must declare at least one step.
    #[error("steps cannot be empty")]
    EmptySteps,

    /// Loop schedules must carry at least one factor.
    #[error("loop factors cannot be empty")]
    EmptyFactors,

    /// Loop factors are fractions of principal and can never be negative.
    #[error("loop factor at index {index} must be non-negative, got {factor}")]
    NegativeFactor {
        /// Position of the invalid factor in the schedule.
        index: usize,
        /// The invalid factor that was provided.
        factor: rust_decimal::Decimal,
    },

    /// A loop strategy needs one factor per pipeline step.
    #[error("expected {expected} loop factors, got {actual}")]
    FactorCountMismatch {
        /// Steps the pipeline declares.
        expected: usize,
        /// Factors the table provides.
        actual: usize,
    },
}
