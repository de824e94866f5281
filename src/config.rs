//! Configuration loading from TOML files.
//!
//! The config declares the solver inputs (principal, amount rounding
//! scale), logging, and the strategy book - one `[[strategy]]` table
//! per product, choosing a shape and its parameters. The book is
//! compiled into a [`StrategyRegistry`] at startup.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::{Amount, Category, PoolId, ProtocolId, StrategyId};
use crate::error::{ConfigError, Result};
use crate::solver::DEFAULT_AMOUNT_SCALE;
use crate::strategy::{shapes, StrategyRegistry};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default, rename = "strategy")]
    pub strategies: Vec<StrategyConfig>,
}

/// Solver inputs.
#[derive(Debug, Deserialize)]
pub struct SolverConfig {
    /// Notional principal strategies are resolved against.
    #[serde(default = "default_principal")]
    pub principal: Amount,

    /// Decimal places loop amounts are rounded to.
    #[serde(default = "default_amount_scale")]
    pub amount_scale: u32,
}

fn default_principal() -> Amount {
    Decimal::new(10_000, 0)
}

fn default_amount_scale() -> u32 {
    DEFAULT_AMOUNT_SCALE
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            principal: default_principal(),
            amount_scale: default_amount_scale(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

/// One entry of the strategy book.
#[derive(Debug, Deserialize)]
pub struct StrategyConfig {
    /// Strategy identity, unique within the book.
    pub name: String,

    /// Keep the strategy for existing positions but exclude it from
    /// ranking.
    #[serde(default)]
    pub retired: bool,

    #[serde(flatten)]
    pub shape: ShapeConfig,
}

/// Shape selector plus shape-specific parameters.
#[derive(Debug, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum ShapeConfig {
    /// One deposit leg at the best venue for the asset.
    Stake {
        asset: String,
        #[serde(default)]
        category: Option<Category>,
    },
    /// Pinned collateral supply plus a sibling borrow.
    CarryLoop {
        protocol: String,
        collateral: String,
        factors: Vec<Decimal>,
        #[serde(default)]
        reward_fee: Option<Decimal>,
    },
    /// Supply -> borrow -> venue-hop supply -> borrow-back.
    DeltaNeutral {
        protocol: String,
        collateral: String,
        factors: Vec<Decimal>,
    },
}

impl Config {
    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.solver.principal <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "solver.principal",
                reason: format!("must be positive, got {}", self.solver.principal),
            }
            .into());
        }

        let mut names = HashSet::new();
        for strategy in &self.strategies {
            if strategy.name.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "strategy.name",
                    reason: "cannot be empty".into(),
                }
                .into());
            }
            if !names.insert(strategy.name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "strategy.name",
                    reason: format!("duplicate strategy '{}'", strategy.name),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Compile the strategy book into a registry.
    ///
    /// # Errors
    ///
    /// Returns the domain error of the first shape whose parameters are
    /// invalid (e.g. a factor table not matching the leg count).
    pub fn build_registry(&self) -> Result<StrategyRegistry> {
        let scale = self.solver.amount_scale;
        let mut registry = StrategyRegistry::new();

        for entry in &self.strategies {
            let id = StrategyId::from(entry.name.as_str());
            let strategy = match &entry.shape {
                ShapeConfig::Stake { asset, category } => {
                    shapes::simple_stake(id, PoolId::from(asset.as_str()), *category)?
                }
                ShapeConfig::CarryLoop {
                    protocol,
                    collateral,
                    factors,
                    reward_fee,
                } => shapes::carry_loop(
                    id,
                    ProtocolId::from(protocol.as_str()),
                    PoolId::from(collateral.as_str()),
                    factors.clone(),
                    scale,
                    *reward_fee,
                )?,
                ShapeConfig::DeltaNeutral {
                    protocol,
                    collateral,
                    factors,
                } => shapes::delta_neutral_loop(
                    id,
                    ProtocolId::from(protocol.as_str()),
                    PoolId::from(collateral.as_str()),
                    factors.clone(),
                    scale,
                )?,
            };
            let strategy = if entry.retired {
                strategy.retired()
            } else {
                strategy
            };
            registry.register(strategy);
        }

        Ok(registry)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            logging: LoggingConfig::default(),
            strategies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    const FULL: &str = r#"
        [solver]
        principal = "25000"
        amount_scale = 4

        [logging]
        level = "debug"
        format = "json"

        [[strategy]]
        name = "stake-wsteth"
        shape = "stake"
        asset = "wsteth"
        category = "liquid-staking"

        [[strategy]]
        name = "wsteth-carry"
        shape = "carry-loop"
        protocol = "hyperlend"
        collateral = "wsteth"
        factors = ["1", "0.6"]
        reward_fee = "0.1"

        [[strategy]]
        name = "usdc-neutral"
        shape = "delta-neutral"
        protocol = "hyperlend"
        collateral = "wsteth"
        factors = ["1", "0.6", "0.6", "0.35"]
        retired = true
    "#;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(FULL).unwrap();
        assert_eq!(config.solver.principal, dec!(25000));
        assert_eq!(config.solver.amount_scale, 4);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.strategies.len(), 3);
        assert!(config.strategies[2].retired);
    }

    #[test]
    fn defaults_apply_when_sections_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.solver.principal, dec!(10000));
        assert_eq!(config.solver.amount_scale, DEFAULT_AMOUNT_SCALE);
        assert_eq!(config.logging.level, "info");
        assert!(config.strategies.is_empty());
    }

    #[test]
    fn build_registry_compiles_all_shapes() {
        let config: Config = toml::from_str(FULL).unwrap();
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.strategies()[0].steps().len(), 1);
        assert_eq!(registry.strategies()[1].steps().len(), 2);
        assert_eq!(registry.strategies()[2].steps().len(), 4);
    }

    #[test]
    fn validate_rejects_non_positive_principal() {
        let config: Config = toml::from_str("[solver]\nprincipal = \"0\"").unwrap();
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "solver.principal",
                ..
            }))
        ));
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let toml_str = r#"
            [[strategy]]
            name = "dup"
            shape = "stake"
            asset = "usdc"

            [[strategy]]
            name = "dup"
            shape = "stake"
            asset = "usdt"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn build_registry_surfaces_bad_factor_tables() {
        let toml_str = r#"
            [[strategy]]
            name = "bad"
            shape = "carry-loop"
            protocol = "hyperlend"
            collateral = "wsteth"
            factors = ["1"]
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.build_registry(),
            Err(Error::Domain(_))
        ));
    }
}
