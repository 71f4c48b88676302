//! Ledger seams.
//!
//! The opname engine and the other screens only see these traits; tests
//! substitute in-memory fakes, production wires in [`crate::HttpLedger`].

use async_trait::async_trait;

use gudang_core::{CategoryId, OpnameId, StockId, ToolId};
use gudang_inventory::{
    Category, CategoryDraft, OpnameUpdate, StockDraft, StockKind, StockOpnameRecord,
    StockTransaction, Tool, ToolDraft,
};

use crate::error::ClientError;

/// Stock-opname records: list everything, write one count at a time.
#[async_trait]
pub trait OpnameLedger: Send + Sync {
    /// `GET /stock-opname`.
    async fn list_opname(&self) -> Result<Vec<StockOpnameRecord>, ClientError>;

    /// `PUT /stock-opname/{id}`. Last write wins; no concurrency token.
    async fn update_opname(&self, id: &OpnameId, update: &OpnameUpdate) -> Result<(), ClientError>;
}

/// Tools and their categories.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<Tool>, ClientError>;
    async fn create_tool(&self, draft: &ToolDraft) -> Result<(), ClientError>;
    async fn update_tool(&self, id: &ToolId, draft: &ToolDraft) -> Result<(), ClientError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ClientError>;
    async fn create_category(&self, draft: &CategoryDraft) -> Result<(), ClientError>;
    async fn update_category(
        &self,
        id: &CategoryId,
        draft: &CategoryDraft,
    ) -> Result<(), ClientError>;
}

/// Stock-in and stock-out transactions.
#[async_trait]
pub trait StockLedger: Send + Sync {
    async fn list_stock(&self, kind: StockKind) -> Result<Vec<StockTransaction>, ClientError>;
    async fn get_stock(
        &self,
        kind: StockKind,
        id: &StockId,
    ) -> Result<StockTransaction, ClientError>;
    async fn create_stock(&self, kind: StockKind, draft: &StockDraft) -> Result<(), ClientError>;
    async fn update_stock(
        &self,
        kind: StockKind,
        id: &StockId,
        draft: &StockDraft,
    ) -> Result<(), ClientError>;
    async fn delete_stock(&self, kind: StockKind, id: &StockId) -> Result<(), ClientError>;
}
