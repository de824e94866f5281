//! Concrete pool filters.
//!
//! Filters encode the protocol/asset continuity rules between steps:
//! pin a venue outright, stay on the previous action's protocol while
//! switching assets, or hop protocols while holding the asset fixed.
//! All of them are pure narrowing functions; an empty input always
//! yields an empty output, and it is the engine - not the filter - that
//! treats an empty result as fatal.

use crate::domain::{Action, Amount, Category, Pool, PoolId, ProtocolId};

use super::PoolFilter;

/// Keep only pools open for new positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveOnly;

impl PoolFilter for LiveOnly {
    fn name(&self) -> &'static str {
        "live-only"
    }

    fn filter(&self, pools: &[Pool], _principal: Amount, _actions: &[Action]) -> Vec<Pool> {
        pools.iter().filter(|p| p.is_live()).cloned().collect()
    }
}

/// Keep only pools whose supply APR the upstream feed produced.
///
/// Deposit legs include this so that an upstream data gap surfaces as
/// filter exhaustion rather than as a downstream aggregation error.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownSupplyRate;

impl PoolFilter for KnownSupplyRate {
    fn name(&self) -> &'static str {
        "known-supply-rate"
    }

    fn filter(&self, pools: &[Pool], _principal: Amount, _actions: &[Action]) -> Vec<Pool> {
        pools
            .iter()
            .filter(|p| p.supply_apr().is_some())
            .cloned()
            .collect()
    }
}

/// Pin one venue outright: pool X on protocol P.
#[derive(Debug, Clone)]
pub struct Pinned {
    protocol: ProtocolId,
    pool: PoolId,
}

impl Pinned {
    /// Pin `pool` on `protocol`.
    pub fn new(protocol: ProtocolId, pool: PoolId) -> Self {
        Self { protocol, pool }
    }
}

impl PoolFilter for Pinned {
    fn name(&self) -> &'static str {
        "pinned"
    }

    fn filter(&self, pools: &[Pool], _principal: Amount, _actions: &[Action]) -> Vec<Pool> {
        pools
            .iter()
            .filter(|p| p.is(&self.protocol, &self.pool))
            .cloned()
            .collect()
    }
}

/// Keep pools listing a given asset, on any protocol.
#[derive(Debug, Clone)]
pub struct Named {
    pool: PoolId,
}

impl Named {
    /// Keep pools named `pool`.
    pub fn new(pool: PoolId) -> Self {
        Self { pool }
    }
}

impl PoolFilter for Named {
    fn name(&self) -> &'static str {
        "named"
    }

    fn filter(&self, pools: &[Pool], _principal: Amount, _actions: &[Action]) -> Vec<Pool> {
        pools
            .iter()
            .filter(|p| p.name() == &self.pool)
            .cloned()
            .collect()
    }
}

/// Keep pools carrying a classification tag.
#[derive(Debug, Clone, Copy)]
pub struct WithCategory {
    category: Category,
}

impl WithCategory {
    /// Keep pools tagged with `category`.
    pub fn new(category: Category) -> Self {
        Self { category }
    }
}

impl PoolFilter for WithCategory {
    fn name(&self) -> &'static str {
        "with-category"
    }

    fn filter(&self, pools: &[Pool], _principal: Amount, _actions: &[Action]) -> Vec<Pool> {
        pools
            .iter()
            .filter(|p| p.has_category(self.category))
            .cloned()
            .collect()
    }
}

/// Keep pools on the previous action's protocol, excluding the
/// previous action's own pool - used to pick a *different* asset to
/// borrow or supply within the same venue.
///
/// With no previous action there is no anchor and the result is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct SameProtocolSiblings;

impl PoolFilter for SameProtocolSiblings {
    fn name(&self) -> &'static str {
        "same-protocol-siblings"
    }

    fn filter(&self, pools: &[Pool], _principal: Amount, actions: &[Action]) -> Vec<Pool> {
        let Some(previous) = actions.last() else {
            return Vec::new();
        };
        let anchor = previous.pool();
        pools
            .iter()
            .filter(|p| p.protocol() == anchor.protocol() && !p.same_venue(anchor))
            .cloned()
            .collect()
    }
}

/// Keep pools listing the previous action's asset on a *different*
/// protocol - used to hop venues while holding the asset fixed.
///
/// With no previous action there is no anchor and the result is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamePoolOtherProtocol;

impl PoolFilter for SamePoolOtherProtocol {
    fn name(&self) -> &'static str {
        "same-pool-other-protocol"
    }

    fn filter(&self, pools: &[Pool], _principal: Amount, actions: &[Action]) -> Vec<Pool> {
        let Some(previous) = actions.last() else {
            return Vec::new();
        };
        let anchor = previous.pool();
        pools
            .iter()
            .filter(|p| p.name() == anchor.name() && p.protocol() != anchor.protocol())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PoolStatus;
    use rust_decimal_macros::dec;

    fn pool(protocol: &str, name: &str) -> Pool {
        Pool::new(
            ProtocolId::from(protocol),
            PoolId::from(name),
            Some(dec!(0.03)),
            dec!(0.01),
            dec!(0.9),
            dec!(0.8),
            vec![],
            dec!(1_000),
            PoolStatus::Live,
        )
    }

    fn paused(protocol: &str, name: &str) -> Pool {
        Pool::new(
            ProtocolId::from(protocol),
            PoolId::from(name),
            Some(dec!(0.03)),
            dec!(0.01),
            dec!(0.9),
            dec!(0.8),
            vec![],
            dec!(1_000),
            PoolStatus::Paused,
        )
    }

    fn no_rate(protocol: &str, name: &str) -> Pool {
        Pool::new(
            ProtocolId::from(protocol),
            PoolId::from(name),
            None,
            dec!(0.01),
            dec!(0.9),
            dec!(0.8),
            vec![],
            dec!(1_000),
            PoolStatus::Live,
        )
    }

    fn deposit(pool: Pool) -> Action {
        Action::new(pool, dec!(100), true)
    }

    #[test]
    fn live_only_drops_paused_pools() {
        let pools = vec![pool("aave", "usdc"), paused("aave", "wsteth")];
        let result = LiveOnly.filter(&pools, dec!(1000), &[]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name().as_str(), "usdc");
    }

    #[test]
    fn known_supply_rate_drops_errored_pools() {
        let pools = vec![pool("aave", "usdc"), no_rate("aave", "wsteth")];
        let result = KnownSupplyRate.filter(&pools, dec!(1000), &[]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name().as_str(), "usdc");
    }

    #[test]
    fn pinned_selects_one_venue() {
        let pools = vec![
            pool("aave", "usdc"),
            pool("morpho", "usdc"),
            pool("aave", "wsteth"),
        ];
        let filter = Pinned::new(ProtocolId::from("morpho"), PoolId::from("usdc"));
        let result = filter.filter(&pools, dec!(1000), &[]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].protocol().as_str(), "morpho");
    }

    #[test]
    fn named_keeps_asset_across_protocols() {
        let pools = vec![
            pool("aave", "usdc"),
            pool("morpho", "usdc"),
            pool("aave", "wsteth"),
        ];
        let result = Named::new(PoolId::from("usdc")).filter(&pools, dec!(1000), &[]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn with_category_matches_tags() {
        let tagged = Pool::new(
            ProtocolId::from("aave"),
            PoolId::from("usdc"),
            Some(dec!(0.03)),
            dec!(0.01),
            dec!(0.9),
            dec!(0.8),
            vec![Category::Stablecoin],
            dec!(1_000),
            PoolStatus::Live,
        );
        let pools = vec![tagged, pool("aave", "wsteth")];
        let result = WithCategory::new(Category::Stablecoin).filter(&pools, dec!(1000), &[]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name().as_str(), "usdc");
    }

    #[test]
    fn siblings_stay_on_protocol_and_exclude_anchor() {
        let pools = vec![
            pool("aave", "usdc"),
            pool("aave", "wsteth"),
            pool("morpho", "usdc"),
        ];
        let actions = vec![deposit(pool("aave", "wsteth"))];
        let result = SameProtocolSiblings.filter(&pools, dec!(1000), &actions);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name().as_str(), "usdc");
        assert_eq!(result[0].protocol().as_str(), "aave");
    }

    #[test]
    fn siblings_without_previous_action_is_empty() {
        let pools = vec![pool("aave", "usdc")];
        let result = SameProtocolSiblings.filter(&pools, dec!(1000), &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn venue_hop_holds_asset_and_changes_protocol() {
        let pools = vec![
            pool("aave", "usdc"),
            pool("morpho", "usdc"),
            pool("morpho", "wsteth"),
        ];
        let actions = vec![deposit(pool("aave", "usdc"))];
        let result = SamePoolOtherProtocol.filter(&pools, dec!(1000), &actions);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].protocol().as_str(), "morpho");
        assert_eq!(result[0].name().as_str(), "usdc");
    }

    #[test]
    fn filters_on_empty_input_return_empty_without_error() {
        let actions = vec![deposit(pool("aave", "usdc"))];
        assert!(LiveOnly.filter(&[], dec!(1000), &[]).is_empty());
        assert!(KnownSupplyRate.filter(&[], dec!(1000), &[]).is_empty());
        assert!(Named::new(PoolId::from("usdc"))
            .filter(&[], dec!(1000), &[])
            .is_empty());
        assert!(SameProtocolSiblings.filter(&[], dec!(1000), &actions).is_empty());
        assert!(SamePoolOtherProtocol
            .filter(&[], dec!(1000), &actions)
            .is_empty());
    }
}
