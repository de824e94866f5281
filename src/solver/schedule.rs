//! Loop amount schedule.
//!
//! Delta-neutral strategies loop supply -> borrow -> supply to approach
//! a target leverage without crossing a venue's liquidation threshold.
//! The hard fixed-point work - solving the convergent geometric series
//! implied by the venues' collateral/borrow factors - happens at
//! strategy-definition time and is captured as one factor per loop
//! step. At runtime the per-step amount is a table lookup and a
//! multiplication. The engine does not re-verify the factors against
//! the venues' live factors.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{Amount, DomainError};

/// Decimal places amounts are rounded to unless configured otherwise.
pub const DEFAULT_AMOUNT_SCALE: u32 = 6;

/// Precomputed per-step amount factors for a looped strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopSchedule {
    factors: Vec<Decimal>,
    scale: u32,
}

impl LoopSchedule {
    /// Create a schedule from per-step factors and a rounding scale.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` when the table is empty or any factor is
    /// negative.
    pub fn try_new(factors: Vec<Decimal>, scale: u32) -> Result<Self, DomainError> {
        if factors.is_empty() {
            return Err(DomainError::EmptyFactors);
        }
        for (index, &factor) in factors.iter().enumerate() {
            if factor < Decimal::ZERO {
                return Err(DomainError::NegativeFactor { index, factor });
            }
        }
        Ok(Self { factors, scale })
    }

    /// The raw factor table.
    #[must_use]
    pub fn factors(&self) -> &[Decimal] {
        &self.factors
    }

    /// The rounding scale applied to computed amounts.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Number of steps the schedule covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Check if the schedule is empty (never true for validated schedules).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Amount assigned to a loop step: `principal * factors[index]`,
    /// rounded to the schedule's scale. `None` when the pipeline has
    /// more steps than the table covers.
    ///
    /// The result depends only on the factor table and the principal,
    /// never on any pool's rate.
    #[must_use]
    pub fn amount_at(&self, index: usize, principal: Amount) -> Option<Amount> {
        self.factors.get(index).map(|factor| {
            (principal * factor)
                .round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amount_is_factor_times_principal() {
        let schedule = LoopSchedule::try_new(
            vec![dec!(1), dec!(0.6), dec!(1), dec!(0.58), dec!(0.55)],
            DEFAULT_AMOUNT_SCALE,
        )
        .unwrap();

        assert_eq!(schedule.amount_at(1, dec!(1000)), Some(dec!(600.000000)));
        assert_eq!(schedule.amount_at(0, dec!(1000)), Some(dec!(1000.000000)));
        assert_eq!(schedule.amount_at(3, dec!(1000)), Some(dec!(580.000000)));
    }

    #[test]
    fn amount_rounds_to_scale() {
        let schedule = LoopSchedule::try_new(vec![dec!(0.333333333)], 6).unwrap();
        assert_eq!(schedule.amount_at(0, dec!(1)), Some(dec!(0.333333)));
    }

    #[test]
    fn amount_rounds_midpoint_away_from_zero() {
        let schedule = LoopSchedule::try_new(vec![dec!(0.0000005)], 6).unwrap();
        assert_eq!(schedule.amount_at(0, dec!(1)), Some(dec!(0.000001)));
    }

    #[test]
    fn index_past_table_is_none() {
        let schedule = LoopSchedule::try_new(vec![dec!(1), dec!(0.6)], 6).unwrap();
        assert_eq!(schedule.amount_at(2, dec!(1000)), None);
    }

    #[test]
    fn rejects_empty_factors() {
        let result = LoopSchedule::try_new(vec![], 6);
        assert!(matches!(result, Err(DomainError::EmptyFactors)));
    }

    #[test]
    fn rejects_negative_factor() {
        let result = LoopSchedule::try_new(vec![dec!(1), dec!(-0.1)], 6);
        assert!(matches!(
            result,
            Err(DomainError::NegativeFactor { index: 1, .. })
        ));
    }
}
