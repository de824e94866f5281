//! Yield and leverage aggregation.
//!
//! Reduces a completed action list to one blended net yield and a
//! leverage ratio. The blend is linear, not compounding: each action's
//! recorded rate applies independently to the capital assigned to it,
//! and borrow costs subtract from the aggregate rather than compound
//! against it. Any fee adjustment already happened when the action was
//! built; no fee logic lives here.

use crate::domain::{Action, Amount, Rate};

use super::SolveError;

/// The aggregate figures for a solved strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blended {
    net_yield: Rate,
    leverage: rust_decimal::Decimal,
}

impl Blended {
    /// Blended net yield as a fraction of principal.
    #[must_use]
    pub const fn net_yield(&self) -> Rate {
        self.net_yield
    }

    /// Amplification of the first leg's stand-alone rate:
    /// `net_yield / rate(first_action)`.
    #[must_use]
    pub const fn leverage(&self) -> rust_decimal::Decimal {
        self.leverage
    }
}

/// Aggregate a completed action list against the original principal:
///
/// `net_yield = Σ sign(a) * rate(a) * amount(a) / principal`
///
/// where `sign` is `+1` for deposits and `-1` for borrows, and `rate`
/// is the supply APR recorded on the action's pool for deposits or the
/// borrow APR for borrows.
///
/// # Errors
///
/// - [`SolveError::EmptyActions`] for an empty list - aggregation only
///   runs once every step has produced its action
/// - [`SolveError::NonPositivePrincipal`] for `principal <= 0`
/// - [`SolveError::RateUnavailable`] when a deposit action's pool never
///   got a supply APR from the feed
/// - [`SolveError::ZeroBaseRate`] when the first action's rate is zero,
///   which would leave leverage undefined
pub fn blend(actions: &[Action], principal: Amount) -> Result<Blended, SolveError> {
    let Some(first) = actions.first() else {
        return Err(SolveError::EmptyActions);
    };
    if principal <= Amount::ZERO {
        return Err(SolveError::NonPositivePrincipal { principal });
    }

    let mut weighted = Amount::ZERO;
    for action in actions {
        let rate = action_rate(action)?;
        let contribution = rate * action.amount();
        if action.is_deposit() {
            weighted += contribution;
        } else {
            weighted -= contribution;
        }
    }

    let net_yield = weighted / principal;

    let base = action_rate(first)?;
    if base == Rate::ZERO {
        return Err(SolveError::ZeroBaseRate {
            protocol: first.pool().protocol().to_string(),
            pool: first.pool().name().to_string(),
        });
    }

    Ok(Blended {
        net_yield,
        leverage: net_yield / base,
    })
}

fn action_rate(action: &Action) -> Result<Rate, SolveError> {
    action.rate().ok_or_else(|| SolveError::RateUnavailable {
        protocol: action.pool().protocol().to_string(),
        pool: action.pool().name().to_string(),
    })
}
