//! Stock-in / stock-out transactions.
//!
//! Both directions share one shape: a header (who, code, note, when) plus the
//! tool lines moved. The ledger applies the quantities; the client only
//! records what was moved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gudang_core::{DomainError, DomainResult, Entity, StockId, ToolId, UserId};

use crate::listing::Searchable;

/// Direction of a stock transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockKind {
    In,
    Out,
}

impl StockKind {
    /// Collection path segment on the ledger.
    pub fn resource(&self) -> &'static str {
        match self {
            StockKind::In => "stock-in",
            StockKind::Out => "stock-out",
        }
    }
}

impl core::fmt::Display for StockKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.resource())
    }
}

/// One tool moved by a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLine {
    pub tool_id: ToolId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    pub quantity: i64,
}

impl StockLine {
    /// Negative quantities are clamped to zero.
    pub fn new(tool_id: ToolId, name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            tool_id,
            name: name.into(),
            price,
            quantity: quantity.max(0),
        }
    }
}

/// Transaction header plus lines, as returned by `GET /stock-in[/{id}]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    #[serde(rename = "_id")]
    pub id: StockId,
    pub user_id: UserId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Lines are omitted by the collection listing and present on detail reads.
    #[serde(default)]
    pub component: Vec<StockLine>,
}

impl StockTransaction {
    pub fn total_quantity(&self) -> i64 {
        self.component.iter().map(|l| l.quantity).sum()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.id.is_valid() {
            return Err(DomainError::invalid_id("stock transaction without _id"));
        }
        if let Some(line) = self.component.iter().find(|l| l.quantity < 0) {
            return Err(DomainError::invariant(format!(
                "stock transaction {}: negative quantity for tool {}",
                self.id, line.tool_id
            )));
        }
        Ok(())
    }
}

impl Entity for StockTransaction {
    type Id = StockId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Searchable for StockTransaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.user_id.as_str(), self.code.as_str(), self.note.as_str()]
    }
}

/// Body of `POST /stock-in` and `PUT /stock-in/{id}` (and the stock-out twins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDraft {
    pub user_id: UserId,
    pub note: String,
    pub component: Vec<StockLine>,
}

impl StockDraft {
    /// A draft must move at least one unit of something.
    pub fn new(
        user_id: UserId,
        note: impl Into<String>,
        lines: Vec<StockLine>,
    ) -> DomainResult<Self> {
        if lines.iter().all(|l| l.quantity == 0) {
            return Err(DomainError::validation(
                "stock transaction needs at least one line with a quantity",
            ));
        }
        Ok(Self {
            user_id,
            note: note.into(),
            component: lines,
        })
    }

    pub fn total_quantity(&self) -> i64 {
        self.component.iter().map(|l| l.quantity).sum()
    }
}
