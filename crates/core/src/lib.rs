//! `gudang-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory
//! models, the ledger client and the stock-opname engine (no IO).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, OpnameId, StockId, ToolId, UserId};
