//! Inventory domain module.
//!
//! Wire-level models of the records the ledger owns (tools, categories,
//! stock-in/out transactions, stock-opname counts) plus the listing rules
//! every screen shares. Pure domain logic: no IO, no HTTP.

pub mod category;
pub mod listing;
pub mod opname;
pub mod stock;
pub mod tool;

pub use category::{Category, CategoryDraft, CategoryType};
pub use listing::{Page, Searchable};
pub use opname::{OpnameUpdate, StockOpnameRecord, ToolSnapshot};
pub use stock::{StockDraft, StockKind, StockLine, StockTransaction};
pub use tool::{Tool, ToolDraft};
