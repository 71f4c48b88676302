use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gudang_core::{DomainError, DomainResult, Entity, OpnameId};

use crate::listing::Searchable;

/// Signed difference between a counted quantity and the system quantity.
pub fn discrepancy(real_stock: i64, system_quantity: i64) -> i64 {
    real_stock - system_quantity
}

/// The tool as embedded (populated) in an opname record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    /// System-recorded quantity.
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub location: Option<String>,
}

/// One stock-opname row: a tool's system quantity against its physical count.
///
/// Records are owned by the ledger. The client only lists them and applies an
/// [`OpnameUpdate`] after a successful save, so `discrepancy` always reflects
/// the count it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOpnameRecord {
    #[serde(rename = "_id")]
    id: OpnameId,
    /// `null` when the tool was deleted after the record was created.
    #[serde(rename = "toolId", default)]
    tool: Option<ToolSnapshot>,
    #[serde(default)]
    real_stock: Option<i64>,
    #[serde(default)]
    discrepancy: i64,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

impl StockOpnameRecord {
    /// A record that has never been counted.
    pub fn uncounted(id: OpnameId, tool: ToolSnapshot) -> Self {
        Self {
            id,
            tool: Some(tool),
            real_stock: None,
            discrepancy: 0,
            date: None,
        }
    }

    pub fn tool(&self) -> Option<&ToolSnapshot> {
        self.tool.as_ref()
    }

    pub fn tool_name(&self) -> &str {
        self.tool.as_ref().map(|t| t.name.as_str()).unwrap_or("")
    }

    pub fn sku(&self) -> &str {
        self.tool.as_ref().map(|t| t.sku.as_str()).unwrap_or("")
    }

    pub fn location(&self) -> Option<&str> {
        self.tool
            .as_ref()
            .and_then(|t| t.location.as_deref())
            .filter(|l| !l.is_empty())
    }

    /// System quantity of the counted tool; a missing tool counts as zero.
    pub fn system_quantity(&self) -> i64 {
        self.tool.as_ref().map(|t| t.quantity).unwrap_or(0)
    }

    pub fn real_stock(&self) -> Option<i64> {
        self.real_stock
    }

    pub fn discrepancy(&self) -> i64 {
        self.discrepancy
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    /// Build the update that records `real_stock` as counted at `at`.
    pub fn count(&self, real_stock: i64, at: DateTime<Utc>) -> DomainResult<OpnameUpdate> {
        if real_stock < 0 {
            return Err(DomainError::validation("real stock cannot be negative"));
        }
        Ok(OpnameUpdate {
            real_stock,
            discrepancy: discrepancy(real_stock, self.system_quantity()),
            date: at,
        })
    }

    /// Replace the committed count with a saved update.
    pub fn apply(&mut self, update: &OpnameUpdate) {
        self.real_stock = Some(update.real_stock);
        self.discrepancy = update.discrepancy;
        self.date = Some(update.date);
    }

    /// Boundary validation for records decoded from the ledger.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.id.is_valid() {
            return Err(DomainError::invalid_id("stock opname record without _id"));
        }
        if let Some(real) = self.real_stock {
            if real < 0 {
                return Err(DomainError::invariant(format!(
                    "stock opname {}: negative realStock {real}",
                    self.id
                )));
            }
        }
        if let Some(tool) = &self.tool {
            if tool.quantity < 0 {
                return Err(DomainError::invariant(format!(
                    "stock opname {}: negative system quantity {}",
                    self.id, tool.quantity
                )));
            }
        }
        Ok(())
    }
}

impl Entity for StockOpnameRecord {
    type Id = OpnameId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Searchable for StockOpnameRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.tool_name(), self.sku(), self.location().unwrap_or("")]
    }
}

/// Body of `PUT /stock-opname/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpnameUpdate {
    pub real_stock: i64,
    pub discrepancy: i64,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn hammer() -> StockOpnameRecord {
        StockOpnameRecord::uncounted(
            OpnameId::new("op-1").unwrap(),
            ToolSnapshot {
                name: "Hammer".to_string(),
                sku: "H1".to_string(),
                quantity: 10,
                location: Some("A1".to_string()),
            },
        )
    }

    #[test]
    fn counting_below_system_quantity_gives_negative_discrepancy() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let mut record = hammer();

        let update = record.count(8, at).unwrap();
        assert_eq!(update.discrepancy, -2);

        record.apply(&update);
        assert_eq!(record.real_stock(), Some(8));
        assert_eq!(record.discrepancy(), -2);
        assert_eq!(record.date(), Some(at));
    }

    #[test]
    fn negative_count_is_rejected() {
        let err = hammer().count(-1, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn missing_tool_counts_against_zero() {
        let json = r#"{ "_id": "op-9", "toolId": null, "realStock": 3, "discrepancy": 3 }"#;
        let record: StockOpnameRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.system_quantity(), 0);
        assert_eq!(record.tool_name(), "");
        assert_eq!(record.count(4, Utc::now()).unwrap().discrepancy, 4);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn decodes_populated_ledger_payload() {
        let json = r#"{
            "_id": "op-1",
            "toolId": { "name": "Hammer", "sku": "H1", "quantity": 10, "location": "A1" },
            "realStock": 8,
            "discrepancy": -2,
            "date": "2026-10-19T08:00:00.000Z"
        }"#;
        let record: StockOpnameRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id().as_str(), "op-1");
        assert_eq!(record.location(), Some("A1"));
        assert_eq!(record.real_stock(), Some(8));
        assert!(record.date().is_some());
    }

    #[test]
    fn tool_without_sku_or_location_still_decodes() {
        let json = r#"{ "_id": "op-1", "toolId": { "name": "Hammer", "quantity": 10 },
            "realStock": 8, "discrepancy": -2 }"#;
        let record: StockOpnameRecord = serde_json::from_str(json).unwrap();

        assert!(record.validate().is_ok());
        assert_eq!(record.tool_name(), "Hammer");
        assert_eq!(record.sku(), "");
        assert_eq!(record.location(), None);
        assert_eq!(record.system_quantity(), 10);
    }

    #[test]
    fn validation_fails_closed_on_negative_real_stock() {
        let json = r#"{ "_id": "op-1", "toolId": null, "realStock": -5 }"#;
        let record: StockOpnameRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(
            record.validate(),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn update_serializes_with_ledger_field_names() {
        let update = OpnameUpdate {
            real_stock: 8,
            discrepancy: -2,
            date: Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["realStock"], 8);
        assert_eq!(value["discrepancy"], -2);
        assert_eq!(value["date"], "2026-10-19T08:00:00Z");
    }

    proptest! {
        #[test]
        fn applied_count_keeps_discrepancy_consistent(
            system in 0i64..100_000,
            real in 0i64..100_000,
        ) {
            let mut record = StockOpnameRecord::uncounted(
                OpnameId::new("op").unwrap(),
                ToolSnapshot {
                    name: "t".into(),
                    sku: "s".into(),
                    quantity: system,
                    location: None,
                },
            );
            let update = record.count(real, Utc::now()).unwrap();
            record.apply(&update);

            prop_assert_eq!(
                record.discrepancy(),
                record.real_stock().unwrap() - record.system_quantity()
            );
        }
    }
}
