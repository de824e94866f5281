//! Loopsmith - leveraged yield strategy resolution.
//!
//! This crate aggregates yield-bearing pools across lending/staking
//! protocols and packages them into composite strategies - leveraged or
//! looped positions resolved into an ordered action list, one blended
//! net yield, and an effective leverage ratio.
//!
//! # Architecture
//!
//! The core is a step-based resolution engine:
//!
//! - **`solver`** - `Step` pipelines of pool filters plus one optimizer
//!   per step, executed as a single greedy pass; the loop amount
//!   schedule; the yield/leverage aggregator
//! - **`strategy`** - the strategy lifecycle object, the registry with
//!   ranked output, and the concrete shapes (stake, carry loop,
//!   delta-neutral loop) assembled as data
//! - **`domain`** - pools, catalogs, actions, and identifiers
//! - **`feed`** - the catalog boundary: JSON records and file/HTTP
//!   sources
//! - **`port`** - outbound collaborator traits (price oracle, balance
//!   reader) and the position valuer
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files with the
//!   strategy book
//! - [`domain`] - Protocol-agnostic types: pools, catalogs, actions
//! - [`error`] - Error types for the crate
//! - [`feed`] - Catalog parsing and sources
//! - [`port`] - Trait definitions for external collaborators
//! - [`solver`] - The resolution engine
//! - [`strategy`] - Strategy lifecycle, registry, and shapes
//! - [`cli`] - Operator command-line interface
//!
//! # Example
//!
//! ```no_run
//! use loopsmith::domain::{PoolId, StrategyId};
//! use loopsmith::strategy::{shapes, StrategyRegistry};
//!
//! let mut registry = StrategyRegistry::new();
//! registry.register(
//!     shapes::simple_stake(StrategyId::from("stake-wsteth"), PoolId::from("wsteth"), None)
//!         .unwrap(),
//! );
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod port;
pub mod solver;
pub mod strategy;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
