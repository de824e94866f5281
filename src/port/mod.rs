//! Outbound ports for external collaborators.
//!
//! The solver itself performs no I/O; prices, balances, and on-chain
//! execution live behind these traits. Implementations are supplied by
//! the surrounding service.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Action, Amount, PoolId, ProtocolId};
use crate::error::Result;

/// USD price per asset.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Current USD price of one unit of `asset`.
    async fn usd_price(&self, asset: &PoolId) -> Result<Decimal>;

    /// Oracle name for logging/debugging.
    fn oracle_name(&self) -> &'static str;
}

/// Raw on-chain balances per address and venue.
#[async_trait]
pub trait BalanceReader: Send + Sync {
    /// Balance `address` holds in `asset` on `protocol`.
    async fn balance_of(
        &self,
        address: &str,
        protocol: &ProtocolId,
        asset: &PoolId,
    ) -> Result<Decimal>;

    /// Reader name for logging/debugging.
    fn reader_name(&self) -> &'static str;
}

/// Values a strategy's position in USD from live balances and prices.
///
/// The sum of a strategy's action amounts at solve time is advisory -
/// used only to rank and display. The figures produced here are the
/// authoritative, independently fetched ones.
pub struct PositionValuer {
    oracle: Arc<dyn PriceOracle>,
    balances: Arc<dyn BalanceReader>,
}

impl PositionValuer {
    /// Create a valuer over the given collaborators.
    pub fn new(oracle: Arc<dyn PriceOracle>, balances: Arc<dyn BalanceReader>) -> Self {
        Self { oracle, balances }
    }

    /// The solve-time advisory figure: the sum of deposit-leg amounts.
    #[must_use]
    pub fn advisory_value(actions: &[Action]) -> Amount {
        actions
            .iter()
            .filter(|a| a.is_deposit())
            .map(Action::amount)
            .sum()
    }

    /// Authoritative USD value of `address`'s position across the
    /// strategy's deposit legs: live balance x live price per venue.
    ///
    /// # Errors
    ///
    /// Propagates the first balance or price lookup failure.
    pub async fn position_value(&self, address: &str, actions: &[Action]) -> Result<Decimal> {
        let mut total = Decimal::ZERO;
        for action in actions.iter().filter(|a| a.is_deposit()) {
            let pool = action.pool();
            let balance = self
                .balances
                .balance_of(address, pool.protocol(), pool.name())
                .await?;
            if balance == Decimal::ZERO {
                continue;
            }
            let price = self.oracle.usd_price(pool.name()).await?;
            total += balance * price;
        }
        Ok(total)
    }
}
