//! The catalog boundary.
//!
//! Upstream feeds publish pool records as JSON; this module parses
//! them into a validated [`PoolCatalog`] and defines the
//! [`CatalogSource`] port the engine consumes snapshots through. The
//! feeds refresh on their own schedule - retries and caching are their
//! concern, not the solver's.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use crate::domain::{Category, Pool, PoolCatalog, PoolId, PoolStatus, ProtocolId, Rate};
use crate::error::{Error, Result};

/// One pool as the upstream feed publishes it.
///
/// `supply_apr` is `null` when the feed failed to compute the rate -
/// the explicit error sentinel; such pools still enter the catalog and
/// are skipped by deposit-leg selection.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolRecord {
    /// Protocol name.
    pub protocol: String,
    /// Pool/asset name.
    pub pool: String,
    /// Supply APR fraction, or `null` for the error sentinel.
    pub supply_apr: Option<Rate>,
    /// Borrow APR fraction.
    pub borrow_apr: Rate,
    /// Borrow factor.
    pub borrow_factor: Decimal,
    /// Collateral factor.
    pub collateral_factor: Decimal,
    /// Asset classification tags.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Pool TVL in USD.
    pub tvl_usd: Decimal,
    /// Live-status tag.
    pub status: PoolStatus,
}

impl PoolRecord {
    fn into_domain(self) -> Result<Pool> {
        Pool::try_new(
            ProtocolId::from(self.protocol),
            PoolId::from(self.pool),
            self.supply_apr,
            self.borrow_apr,
            self.borrow_factor,
            self.collateral_factor,
            self.categories,
            self.tvl_usd,
            self.status,
        )
        .map_err(Error::from)
    }
}

/// Parse a feed snapshot (a JSON array of records) into a catalog,
/// stamped with the current instant.
///
/// # Errors
///
/// Returns an error for malformed JSON, a record violating domain
/// invariants, or a duplicate `(protocol, pool)` identity.
pub fn parse_catalog(json: &str) -> Result<PoolCatalog> {
    let records: Vec<PoolRecord> = serde_json::from_str(json)?;
    let pools = records
        .into_iter()
        .map(PoolRecord::into_domain)
        .collect::<Result<Vec<_>>>()?;
    Ok(PoolCatalog::try_from_pools(pools)?.with_fetched_at(Utc::now()))
}

/// Produces catalog snapshots for solver runs.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch a fresh snapshot.
    async fn fetch(&self) -> Result<PoolCatalog>;

    /// Source name for logging/debugging.
    fn source_name(&self) -> &'static str;
}

/// Reads catalog snapshots from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<PoolCatalog> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        parse_catalog(&body)
    }

    fn source_name(&self) -> &'static str {
        "file"
    }
}

/// Fetches catalog snapshots over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    url: Url,
    client: reqwest::Client,
}

impl HttpCatalogSource {
    /// Create a source fetching from `url`.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<PoolCatalog> {
        let body = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_catalog(&body)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SNAPSHOT: &str = r#"[
        {
            "protocol": "hyperlend",
            "pool": "wsteth",
            "supply_apr": "0.031",
            "borrow_apr": "0.012",
            "borrow_factor": "0.9",
            "collateral_factor": "0.8",
            "categories": ["liquid-staking"],
            "tvl_usd": "12000000",
            "status": "live"
        },
        {
            "protocol": "morpho",
            "pool": "usdc",
            "supply_apr": null,
            "borrow_apr": "0.05",
            "borrow_factor": "0.92",
            "collateral_factor": "0.85",
            "tvl_usd": "500000",
            "status": "paused"
        }
    ]"#;

    #[test]
    fn parse_catalog_reads_records_in_order() {
        let catalog = parse_catalog(SNAPSHOT).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.pools()[0].protocol().as_str(), "hyperlend");
        assert!(catalog.pools()[0].has_category(Category::LiquidStaking));
        assert_eq!(catalog.pools()[1].status(), PoolStatus::Paused);
        assert!(catalog.fetched_at().is_some());
    }

    #[test]
    fn null_supply_apr_is_the_error_sentinel() {
        let catalog = parse_catalog(SNAPSHOT).unwrap();
        assert_eq!(catalog.pools()[1].supply_apr(), None);
        assert_eq!(catalog.pools()[1].borrow_apr(), dec!(0.05));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_catalog("not json").is_err());
    }

    #[test]
    fn invalid_record_is_an_error() {
        let json = r#"[{
            "protocol": "aave", "pool": "usdc",
            "supply_apr": "-0.01", "borrow_apr": "0.05",
            "borrow_factor": "0.9", "collateral_factor": "0.8",
            "tvl_usd": "1", "status": "live"
        }]"#;
        assert!(matches!(parse_catalog(json), Err(Error::Domain(_))));
    }

    #[test]
    fn duplicate_identity_is_an_error() {
        let json = r#"[
            {"protocol": "aave", "pool": "usdc", "supply_apr": "0.01",
             "borrow_apr": "0.05", "borrow_factor": "0.9",
             "collateral_factor": "0.8", "tvl_usd": "1", "status": "live"},
            {"protocol": "aave", "pool": "usdc", "supply_apr": "0.02",
             "borrow_apr": "0.05", "borrow_factor": "0.9",
             "collateral_factor": "0.8", "tvl_usd": "1", "status": "live"}
        ]"#;
        assert!(matches!(parse_catalog(json), Err(Error::Domain(_))));
    }
}
