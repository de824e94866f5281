//! Concrete strategy shapes.
//!
//! Each shape is a small constructor producing a step list (and, for
//! loops, a factor table) - strategies are assembled as data, not as a
//! class hierarchy. Three shapes cover the current product range:
//!
//! - [`simple_stake`]: one deposit leg, best supply APR across venues
//! - [`carry_loop`]: pinned collateral supply plus a sibling borrow on
//!   the same venue
//! - [`delta_neutral_loop`]: supply -> borrow -> venue-hop supply ->
//!   borrow-back, net exposure on the looped asset approximately zero

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{Category, DomainError, PoolId, ProtocolId, StrategyId};
use crate::solver::filters::{
    KnownSupplyRate, LiveOnly, Named, Pinned, SameProtocolSiblings, SamePoolOtherProtocol,
    WithCategory,
};
use crate::solver::optimizers::{BestSupplyRate, LoopLeg};
use crate::solver::{LoopSchedule, PoolFilter, Step};

use super::Strategy;

/// One deposit step: stake `asset` wherever it currently earns the
/// highest supply APR, optionally narrowed to a classification tag.
///
/// # Errors
///
/// Never fails validation today; the `Result` keeps the constructor
/// signatures uniform across shapes.
pub fn simple_stake(
    id: StrategyId,
    asset: PoolId,
    category: Option<Category>,
) -> Result<Strategy, DomainError> {
    let mut filters: Vec<Box<dyn PoolFilter>> = vec![
        Box::new(LiveOnly),
        Box::new(KnownSupplyRate),
        Box::new(Named::new(asset.clone())),
    ];
    if let Some(category) = category {
        filters.push(Box::new(WithCategory::new(category)));
    }

    Strategy::try_new(
        id,
        vec![Step::new(
            format!("Stake {asset}"),
            filters,
            Box::new(BestSupplyRate),
        )],
    )
}

/// Two-leg carry loop: supply `collateral` on `protocol`, then borrow
/// the cheapest sibling asset on the same venue. The optional
/// `reward_fee` discounts the supply leg's reward APR before it is
/// recorded, so the blended figures are fee-adjusted.
///
/// `factors` must provide exactly one fraction per leg.
///
/// # Errors
///
/// Returns `DomainError` for an invalid factor table.
pub fn carry_loop(
    id: StrategyId,
    protocol: ProtocolId,
    collateral: PoolId,
    factors: Vec<Decimal>,
    scale: u32,
    reward_fee: Option<Decimal>,
) -> Result<Strategy, DomainError> {
    let schedule = validated_schedule(factors, scale, 2)?;

    let supply: Box<LoopLeg> = match reward_fee {
        Some(fee) => Box::new(LoopLeg::deposit_with_fee(Arc::clone(&schedule), fee)),
        None => Box::new(LoopLeg::deposit(Arc::clone(&schedule))),
    };

    Strategy::try_new(
        id,
        vec![
            Step::new(
                format!("Supply {collateral}"),
                vec![
                    Box::new(LiveOnly),
                    Box::new(KnownSupplyRate),
                    Box::new(Pinned::new(protocol, collateral)),
                ],
                supply,
            ),
            Step::new(
                "Borrow sibling",
                vec![Box::new(LiveOnly), Box::new(SameProtocolSiblings)],
                Box::new(LoopLeg::borrow(schedule)),
            ),
        ],
    )
}

/// Four-leg delta-neutral loop:
///
/// 1. supply `collateral` on `protocol` (pinned)
/// 2. borrow the cheapest sibling on the same venue
/// 3. redeploy the borrowed asset on another protocol (venue hop)
/// 4. borrow back on the second venue, closing the delta
///
/// `factors` must provide exactly one fraction per leg; they are
/// derived offline from the venues' collateral/borrow factors so the
/// loop converges inside the liquidation threshold.
///
/// # Errors
///
/// Returns `DomainError` for an invalid factor table.
pub fn delta_neutral_loop(
    id: StrategyId,
    protocol: ProtocolId,
    collateral: PoolId,
    factors: Vec<Decimal>,
    scale: u32,
) -> Result<Strategy, DomainError> {
    let schedule = validated_schedule(factors, scale, 4)?;

    Strategy::try_new(
        id,
        vec![
            Step::new(
                format!("Supply {collateral}"),
                vec![
                    Box::new(LiveOnly),
                    Box::new(KnownSupplyRate),
                    Box::new(Pinned::new(protocol, collateral)),
                ],
                Box::new(LoopLeg::deposit(Arc::clone(&schedule))),
            ),
            Step::new(
                "Borrow sibling",
                vec![Box::new(LiveOnly), Box::new(SameProtocolSiblings)],
                Box::new(LoopLeg::borrow(Arc::clone(&schedule))),
            ),
            Step::new(
                "Redeploy borrow",
                vec![
                    Box::new(LiveOnly),
                    Box::new(KnownSupplyRate),
                    Box::new(SamePoolOtherProtocol),
                ],
                Box::new(LoopLeg::deposit(Arc::clone(&schedule))),
            ),
            Step::new(
                "Close the delta",
                vec![Box::new(LiveOnly), Box::new(SameProtocolSiblings)],
                Box::new(LoopLeg::borrow(schedule)),
            ),
        ],
    )
}

fn validated_schedule(
    factors: Vec<Decimal>,
    scale: u32,
    steps: usize,
) -> Result<Arc<LoopSchedule>, DomainError> {
    if factors.len() != steps {
        return Err(DomainError::FactorCountMismatch {
            expected: steps,
            actual: factors.len(),
        });
    }
    Ok(Arc::new(LoopSchedule::try_new(factors, scale)?))
}
