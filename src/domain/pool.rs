//! Pool-related domain types.
//!
//! - [`Pool`] - one yield venue for one asset on one protocol
//! - [`PoolStatus`] - live-status tag carried by the upstream catalog
//! - [`Category`] - asset classification tags used by filters

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{PoolId, ProtocolId};
use super::money::Rate;

/// Live-status tag for a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoolStatus {
    /// Open for deposits and borrows.
    Live,
    /// Temporarily not accepting new positions.
    Paused,
    /// Delisted by the protocol.
    Retired,
}

/// Asset classification tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// USD-pegged assets.
    Stablecoin,
    /// Yield-bearing staked derivatives (wstETH, stSOL, ...).
    LiquidStaking,
    /// Large-cap base assets (ETH, BTC).
    Bluechip,
    /// Protocol governance tokens.
    Governance,
}

/// A yield-bearing venue for one asset on one protocol.
///
/// The supply APR may be unavailable when the upstream feed failed to
/// compute it; such pools stay in the catalog (their borrow side is
/// still usable) but are skipped by deposit-leg selection.
///
/// Within one catalog a pool is uniquely identified by
/// `(protocol, name)`. The same pool name appearing on several
/// protocols is expected - filters pick between the duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    protocol: ProtocolId,
    name: PoolId,
    supply_apr: Option<Rate>,
    borrow_apr: Rate,
    borrow_factor: Decimal,
    collateral_factor: Decimal,
    categories: Vec<Category>,
    tvl_usd: Decimal,
    status: PoolStatus,
}

impl Pool {
    /// Create a new pool without invariant validation.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        protocol: ProtocolId,
        name: PoolId,
        supply_apr: Option<Rate>,
        borrow_apr: Rate,
        borrow_factor: Decimal,
        collateral_factor: Decimal,
        categories: Vec<Category>,
        tvl_usd: Decimal,
        status: PoolStatus,
    ) -> Self {
        Self {
            protocol,
            name,
            supply_apr,
            borrow_apr,
            borrow_factor,
            collateral_factor,
            categories,
            tvl_usd,
            status,
        }
    }

    /// Create a new pool with domain invariant validation.
    ///
    /// # Domain Invariants
    ///
    /// - rates must be non-negative (an absent supply APR is the
    ///   upstream error sentinel, not a negative rate)
    /// - borrow and collateral factors must be within `[0, 1]`
    /// - TVL must be non-negative
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if any invariant is violated.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        protocol: ProtocolId,
        name: PoolId,
        supply_apr: Option<Rate>,
        borrow_apr: Rate,
        borrow_factor: Decimal,
        collateral_factor: Decimal,
        categories: Vec<Category>,
        tvl_usd: Decimal,
        status: PoolStatus,
    ) -> Result<Self, DomainError> {
        if let Some(rate) = supply_apr {
            if rate < Decimal::ZERO {
                return Err(DomainError::NegativeRate { rate });
            }
        }
        if borrow_apr < Decimal::ZERO {
            return Err(DomainError::NegativeRate { rate: borrow_apr });
        }
        for (field, value) in [
            ("borrow_factor", borrow_factor),
            ("collateral_factor", collateral_factor),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(DomainError::FactorOutOfRange { field, value });
            }
        }
        if tvl_usd < Decimal::ZERO {
            return Err(DomainError::NegativeTvl { tvl: tvl_usd });
        }

        Ok(Self::new(
            protocol,
            name,
            supply_apr,
            borrow_apr,
            borrow_factor,
            collateral_factor,
            categories,
            tvl_usd,
            status,
        ))
    }

    /// Get the protocol this pool belongs to.
    #[must_use]
    pub const fn protocol(&self) -> &ProtocolId {
        &self.protocol
    }

    /// Get the pool/asset name.
    #[must_use]
    pub const fn name(&self) -> &PoolId {
        &self.name
    }

    /// Get the supply APR, if the upstream feed produced one.
    #[must_use]
    pub const fn supply_apr(&self) -> Option<Rate> {
        self.supply_apr
    }

    /// Get the borrow APR.
    #[must_use]
    pub const fn borrow_apr(&self) -> Rate {
        self.borrow_apr
    }

    /// Get the borrow factor.
    #[must_use]
    pub const fn borrow_factor(&self) -> Decimal {
        self.borrow_factor
    }

    /// Get the collateral factor.
    #[must_use]
    pub const fn collateral_factor(&self) -> Decimal {
        self.collateral_factor
    }

    /// Get the classification tags.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Get the pool TVL in USD.
    #[must_use]
    pub const fn tvl_usd(&self) -> Decimal {
        self.tvl_usd
    }

    /// Get the live-status tag.
    #[must_use]
    pub const fn status(&self) -> PoolStatus {
        self.status
    }

    /// Check if the pool is open for new positions.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.status == PoolStatus::Live
    }

    /// Check if the pool carries a classification tag.
    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Check identity against a `(protocol, pool)` pair.
    #[must_use]
    pub fn is(&self, protocol: &ProtocolId, name: &PoolId) -> bool {
        &self.protocol == protocol && &self.name == name
    }

    /// Check identity against another pool.
    #[must_use]
    pub fn same_venue(&self, other: &Pool) -> bool {
        self.is(other.protocol(), other.name())
    }

    /// Copy of this pool with its supply APR replaced.
    ///
    /// Loop optimizers use this to record a fee-adjusted effective rate
    /// on the action's pool; the catalog's pool is never mutated.
    #[must_use]
    pub fn with_supply_apr(&self, rate: Rate) -> Self {
        let mut pool = self.clone();
        pool.supply_apr = Some(rate);
        pool
    }
}
