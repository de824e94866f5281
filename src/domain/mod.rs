//! Protocol-agnostic domain logic.

mod action;
mod catalog;
pub mod error;
mod id;
mod money;
mod pool;

// Core domain types
pub use action::{call_plan, Action, Call, CallKind};
pub use catalog::PoolCatalog;
pub use error::DomainError;
pub use id::{PoolId, ProtocolId, StrategyId};
pub use money::{Amount, Rate};
pub use pool::{Category, Pool, PoolStatus};
