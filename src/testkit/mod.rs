//! Builders for domain fixtures used across tests.
//!
//! Provides concise factory functions for [`Pool`], [`PoolCatalog`],
//! and related types so tests focus on assertions rather than
//! construction boilerplate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Category, Pool, PoolCatalog, PoolId, PoolStatus, ProtocolId, Rate};

/// A live pool with the given rates and unremarkable factors/TVL.
pub fn pool(protocol: &str, name: &str, supply_apr: Rate, borrow_apr: Rate) -> Pool {
    Pool::new(
        ProtocolId::from(protocol),
        PoolId::from(name),
        Some(supply_apr),
        borrow_apr,
        dec!(0.9),
        dec!(0.8),
        vec![],
        dec!(1_000_000),
        PoolStatus::Live,
    )
}

/// A live pool whose supply APR carries the upstream error sentinel.
pub fn pool_without_rate(protocol: &str, name: &str, borrow_apr: Rate) -> Pool {
    Pool::new(
        ProtocolId::from(protocol),
        PoolId::from(name),
        None,
        borrow_apr,
        dec!(0.9),
        dec!(0.8),
        vec![],
        dec!(1_000_000),
        PoolStatus::Live,
    )
}

/// A pool with an explicit live-status tag.
pub fn pool_with_status(
    protocol: &str,
    name: &str,
    supply_apr: Rate,
    status: PoolStatus,
) -> Pool {
    Pool::new(
        ProtocolId::from(protocol),
        PoolId::from(name),
        Some(supply_apr),
        dec!(0.01),
        dec!(0.9),
        dec!(0.8),
        vec![],
        dec!(1_000_000),
        status,
    )
}

/// A pool carrying classification tags.
pub fn tagged_pool(
    protocol: &str,
    name: &str,
    supply_apr: Rate,
    categories: Vec<Category>,
) -> Pool {
    Pool::new(
        ProtocolId::from(protocol),
        PoolId::from(name),
        Some(supply_apr),
        dec!(0.01),
        dec!(0.9),
        dec!(0.8),
        categories,
        dec!(1_000_000),
        PoolStatus::Live,
    )
}

/// Build a catalog, panicking on duplicate identities.
pub fn catalog(pools: Vec<Pool>) -> PoolCatalog {
    PoolCatalog::try_from_pools(pools).expect("fixture catalog has unique pool identities")
}

/// The standard two-venue fixture used by loop tests: a collateral
/// asset and a stable on `hyperlend`, the same pair mirrored on
/// `morpho` with the stable earning more and the collateral cheaper to
/// borrow.
pub fn two_venue_catalog() -> PoolCatalog {
    catalog(vec![
        pool("hyperlend", "wsteth", dec!(0.10), dec!(0.015)),
        pool("hyperlend", "usdc", dec!(0.03), dec!(0.04)),
        pool("morpho", "usdc", dec!(0.08), dec!(0.05)),
        pool("morpho", "wsteth", dec!(0.02), dec!(0.025)),
    ])
}

/// Standard loop factor table for four-leg fixtures.
pub fn four_leg_factors() -> Vec<Decimal> {
    vec![dec!(1), dec!(0.6), dec!(0.6), dec!(0.35)]
}
