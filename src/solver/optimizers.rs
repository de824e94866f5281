//! Concrete optimizers.
//!
//! [`BestSupplyRate`] is the greedy default used by simple strategies:
//! highest supply APR wins, compared with strict `>`, so ties resolve
//! to the first-seen pool in catalog order. [`LoopLeg`] is the
//! loop-strategy optimizer: it sizes the action from the precomputed
//! [`LoopSchedule`](super::LoopSchedule) and, for fee-adjusted
//! accounting, records a discounted effective supply APR on the
//! action's pool before the action is built - the aggregator itself
//! never applies fees.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{Action, Amount, Pool, Rate};

use super::{LoopSchedule, Optimizer};

/// Greedy single-criterion choice: the pool with the highest known
/// supply APR, sized at the full principal, recorded as a deposit.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestSupplyRate;

impl Optimizer for BestSupplyRate {
    fn name(&self) -> &'static str {
        "best-supply-rate"
    }

    fn optimize(&self, pools: &[Pool], principal: Amount, mut actions: Vec<Action>) -> Vec<Action> {
        if let Some(best) = best_supply(pools) {
            actions.push(Action::new(best.clone(), principal, true));
        }
        actions
    }
}

/// Direction of a loop leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    /// Supply/stake into the chosen pool.
    Deposit,
    /// Borrow against the position built so far.
    Borrow,
}

/// Loop-strategy optimizer: one leg of a supply/borrow loop.
///
/// The amount for the leg is `schedule.amount_at(i, principal)` where
/// `i` is the leg's position in the pipeline (the number of actions
/// accumulated so far) - never a function of any pool's APR. When the
/// schedule has no factor for the position, no action is appended and
/// the engine reports the optimizer-contract violation.
pub struct LoopLeg {
    schedule: Arc<LoopSchedule>,
    leg: Leg,
    reward_fee: Option<Decimal>,
}

impl LoopLeg {
    /// Create a deposit leg.
    pub fn deposit(schedule: Arc<LoopSchedule>) -> Self {
        Self {
            schedule,
            leg: Leg::Deposit,
            reward_fee: None,
        }
    }

    /// Create a deposit leg whose reward APR is discounted by a
    /// protocol fee fraction before being recorded on the action.
    pub fn deposit_with_fee(schedule: Arc<LoopSchedule>, reward_fee: Decimal) -> Self {
        Self {
            schedule,
            leg: Leg::Deposit,
            reward_fee: Some(reward_fee),
        }
    }

    /// Create a borrow leg.
    pub fn borrow(schedule: Arc<LoopSchedule>) -> Self {
        Self {
            schedule,
            leg: Leg::Borrow,
            reward_fee: None,
        }
    }
}

impl Optimizer for LoopLeg {
    fn name(&self) -> &'static str {
        match self.leg {
            Leg::Deposit => "loop-deposit",
            Leg::Borrow => "loop-borrow",
        }
    }

    fn optimize(&self, pools: &[Pool], principal: Amount, mut actions: Vec<Action>) -> Vec<Action> {
        let index = actions.len();
        let Some(amount) = self.schedule.amount_at(index, principal) else {
            return actions;
        };

        match self.leg {
            Leg::Deposit => {
                if let Some(best) = best_supply(pools) {
                    let pool = match (self.reward_fee, best.supply_apr()) {
                        (Some(fee), Some(raw)) => {
                            best.with_supply_apr(raw * (Decimal::ONE - fee))
                        }
                        _ => best.clone(),
                    };
                    actions.push(Action::new(pool, amount, true));
                }
            }
            Leg::Borrow => {
                if let Some(cheapest) = cheapest_borrow(pools) {
                    actions.push(Action::new(cheapest.clone(), amount, false));
                }
            }
        }
        actions
    }
}

/// Highest known supply APR; strict `>` means catalog order wins ties.
fn best_supply(pools: &[Pool]) -> Option<&Pool> {
    let mut best: Option<(&Pool, Rate)> = None;
    for pool in pools {
        let Some(rate) = pool.supply_apr() else {
            continue;
        };
        match best {
            Some((_, best_rate)) if rate > best_rate => best = Some((pool, rate)),
            None => best = Some((pool, rate)),
            _ => {}
        }
    }
    best.map(|(pool, _)| pool)
}

/// Lowest borrow APR; strict `<` means catalog order wins ties.
fn cheapest_borrow(pools: &[Pool]) -> Option<&Pool> {
    let mut cheapest: Option<(&Pool, Rate)> = None;
    for pool in pools {
        let rate = pool.borrow_apr();
        match cheapest {
            Some((_, cheapest_rate)) if rate < cheapest_rate => cheapest = Some((pool, rate)),
            None => cheapest = Some((pool, rate)),
            _ => {}
        }
    }
    cheapest.map(|(pool, _)| pool)
}
