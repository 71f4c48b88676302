//! `gudang-client`
//!
//! **Responsibility:** typed REST boundary to the warehouse ledger.
//!
//! This crate provides:
//! - Ledger traits the opname engine and other screens program against
//! - An HTTP implementation over `reqwest`
//! - Envelope decoding with validation that fails closed
//!
//! The ledger is the authority; nothing here caches or merges records.

pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod ledger;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::HttpLedger;
pub use ledger::{InventoryStore, OpnameLedger, StockLedger};
