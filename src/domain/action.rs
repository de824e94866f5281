//! Action types - the edges of a strategy's execution graph.
//!
//! Actions are append-only and positional: the action at index `i` is
//! produced exclusively by step `i` of the pipeline, and an action list
//! is only meaningful as a whole ordered sequence.

use serde::Serialize;

use super::error::DomainError;
use super::id::{PoolId, ProtocolId};
use super::money::{Amount, Rate};
use super::pool::Pool;

/// One step of a strategy's execution: a deposit into or a borrow
/// against a specific pool, with a sized amount.
///
/// The pool is a snapshot taken at solve time; loop optimizers may have
/// replaced its supply APR with a fee-adjusted effective rate before
/// attaching it here.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pool: Pool,
    amount: Amount,
    is_deposit: bool,
    step_name: String,
}

impl Action {
    /// Create a new action without invariant validation.
    pub fn new(pool: Pool, amount: Amount, is_deposit: bool) -> Self {
        Self {
            pool,
            amount,
            is_deposit,
            step_name: String::new(),
        }
    }

    /// Create a new action, validating that the amount is executable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NonPositiveAmount` for amounts `<= 0`.
    pub fn try_new(pool: Pool, amount: Amount, is_deposit: bool) -> Result<Self, DomainError> {
        if amount <= Amount::ZERO {
            return Err(DomainError::NonPositiveAmount { amount });
        }
        Ok(Self::new(pool, amount, is_deposit))
    }

    /// Get the pool this action targets.
    #[must_use]
    pub const fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Get the sized amount.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    /// Check whether this is a supply/stake action (`false` = borrow).
    #[must_use]
    pub const fn is_deposit(&self) -> bool {
        self.is_deposit
    }

    /// Get the display name of the step that produced this action.
    #[must_use]
    pub fn step_name(&self) -> &str {
        &self.step_name
    }

    /// The rate this action accrues at: the pool's supply APR for
    /// deposits (absent when the feed never produced one), the borrow
    /// APR for borrows.
    #[must_use]
    pub fn rate(&self) -> Option<Rate> {
        if self.is_deposit {
            self.pool.supply_apr()
        } else {
            Some(self.pool.borrow_apr())
        }
    }

    pub(crate) fn set_step_name(&mut self, name: impl Into<String>) {
        self.step_name = name.into();
    }
}

/// Verb of a [`Call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallKind {
    /// Supply/stake into the pool.
    Supply,
    /// Borrow against the position.
    Borrow,
}

/// Plain-data call description handed to the external transaction
/// builder. Construction and submission of actual on-chain calls are
/// outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    /// Target protocol.
    pub protocol: ProtocolId,
    /// Target pool/asset.
    pub pool: PoolId,
    /// Supply or borrow.
    pub kind: CallKind,
    /// Decimal amount, string-encoded on the wire.
    pub amount: Amount,
}

/// Project a resolved action list onto the call-builder boundary,
/// preserving order.
#[must_use]
pub fn call_plan(actions: &[Action]) -> Vec<Call> {
    actions
        .iter()
        .map(|action| Call {
            protocol: action.pool().protocol().clone(),
            pool: action.pool().name().clone(),
            kind: if action.is_deposit() {
                CallKind::Supply
            } else {
                CallKind::Borrow
            },
            amount: action.amount(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pool::PoolStatus;
    use rust_decimal_macros::dec;

    fn pool(protocol: &str, name: &str, supply: Option<Rate>, borrow: Rate) -> Pool {
        Pool::new(
            ProtocolId::from(protocol),
            PoolId::from(name),
            supply,
            borrow,
            dec!(0.9),
            dec!(0.8),
            vec![],
            dec!(1_000),
            PoolStatus::Live,
        )
    }

    #[test]
    fn deposit_rate_is_supply_apr() {
        let action = Action::new(
            pool("aave", "usdc", Some(dec!(0.04)), dec!(0.06)),
            dec!(100),
            true,
        );
        assert_eq!(action.rate(), Some(dec!(0.04)));
    }

    #[test]
    fn borrow_rate_is_borrow_apr() {
        let action = Action::new(
            pool("aave", "usdc", Some(dec!(0.04)), dec!(0.06)),
            dec!(100),
            false,
        );
        assert_eq!(action.rate(), Some(dec!(0.06)));
    }

    #[test]
    fn deposit_rate_missing_when_feed_errored() {
        let action = Action::new(pool("aave", "usdc", None, dec!(0.06)), dec!(100), true);
        assert_eq!(action.rate(), None);
    }

    #[test]
    fn try_new_rejects_non_positive_amount() {
        let result = Action::try_new(
            pool("aave", "usdc", Some(dec!(0.04)), dec!(0.06)),
            dec!(0),
            true,
        );
        assert!(matches!(
            result,
            Err(DomainError::NonPositiveAmount { .. })
        ));
    }

    #[test]
    fn call_plan_preserves_order_and_verbs() {
        let actions = vec![
            Action::new(
                pool("hyperlend", "wsteth", Some(dec!(0.03)), dec!(0.01)),
                dec!(1000),
                true,
            ),
            Action::new(
                pool("hyperlend", "usdc", Some(dec!(0.04)), dec!(0.05)),
                dec!(600),
                false,
            ),
        ];

        let plan = call_plan(&actions);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].kind, CallKind::Supply);
        assert_eq!(plan[0].amount, dec!(1000));
        assert_eq!(plan[1].kind, CallKind::Borrow);
        assert_eq!(plan[1].pool.as_str(), "usdc");
    }

    #[test]
    fn call_amount_serializes_as_string() {
        let plan = call_plan(&[Action::new(
            pool("aave", "usdc", Some(dec!(0.04)), dec!(0.06)),
            dec!(600.5),
            false,
        )]);
        let json = serde_json::to_string(&plan[0]).unwrap();
        assert!(json.contains("\"amount\":\"600.5\""));
        assert!(json.contains("\"kind\":\"borrow\""));
    }
}
