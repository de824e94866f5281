//! The pool catalog consumed by solver runs.
//!
//! A catalog is an ordered, read-only collection of [`Pool`] records
//! plus a lookup index by `(protocol, pool)` identity. Catalog order is
//! meaningful: greedy optimizers resolve ties in favor of the
//! first-seen pool.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::error::DomainError;
use super::id::{PoolId, ProtocolId};
use super::pool::Pool;

/// Ordered collection of pools, refreshed by the external feed on its
/// own schedule and never mutated by the solver.
#[derive(Debug, Clone, Default)]
pub struct PoolCatalog {
    pools: Vec<Pool>,
    index: HashMap<(ProtocolId, PoolId), usize>,
    fetched_at: Option<DateTime<Utc>>,
}

impl PoolCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from pools, preserving order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicatePool` when two pools share a
    /// `(protocol, pool)` identity - the catalog invariant the solver
    /// relies on.
    pub fn try_from_pools(pools: Vec<Pool>) -> Result<Self, DomainError> {
        let mut index = HashMap::with_capacity(pools.len());
        for (i, pool) in pools.iter().enumerate() {
            let key = (pool.protocol().clone(), pool.name().clone());
            if index.insert(key, i).is_some() {
                return Err(DomainError::DuplicatePool {
                    protocol: pool.protocol().to_string(),
                    pool: pool.name().to_string(),
                });
            }
        }
        Ok(Self {
            pools,
            index,
            fetched_at: None,
        })
    }

    /// Tag the catalog with the instant the feed produced it.
    #[must_use]
    pub fn with_fetched_at(mut self, at: DateTime<Utc>) -> Self {
        self.fetched_at = Some(at);
        self
    }

    /// When the upstream feed produced this snapshot, if known.
    #[must_use]
    pub const fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// All pools in catalog order.
    #[must_use]
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// Look up one venue by its identity.
    #[must_use]
    pub fn get(&self, protocol: &ProtocolId, name: &PoolId) -> Option<&Pool> {
        self.index
            .get(&(protocol.clone(), name.clone()))
            .map(|&i| &self.pools[i])
    }

    /// Number of pools in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
