//! `{ "data": ... }` response envelope and boundary validation.
//!
//! Every listing the ledger returns is wrapped in a `data` field. Decoding
//! goes through [`decode`], so a payload that does not match the schema or
//! breaks a domain invariant is reported as an error instead of reaching the
//! caller half-formed.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use gudang_core::DomainResult;
use gudang_inventory::{Category, StockOpnameRecord, StockTransaction, Tool};

use crate::error::ClientError;

#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Post-deserialization checks for ledger payloads.
pub trait Validate {
    fn validate(&self) -> DomainResult<()>;
}

impl Validate for StockOpnameRecord {
    fn validate(&self) -> DomainResult<()> {
        StockOpnameRecord::validate(self)
    }
}

impl Validate for Tool {
    fn validate(&self) -> DomainResult<()> {
        Tool::validate(self)
    }
}

impl Validate for Category {
    fn validate(&self) -> DomainResult<()> {
        Category::validate(self)
    }
}

impl Validate for StockTransaction {
    fn validate(&self) -> DomainResult<()> {
        StockTransaction::validate(self)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> DomainResult<()> {
        self.iter().try_for_each(Validate::validate)
    }
}

/// Decode an enveloped body and validate its contents.
pub fn decode<T>(body: &[u8]) -> Result<T, ClientError>
where
    T: DeserializeOwned + Validate,
{
    let envelope: DataEnvelope<T> =
        serde_json::from_slice(body).map_err(|e| ClientError::Parse(e.to_string()))?;
    envelope.data.validate()?;
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_enveloped_listing() {
        let body = br#"{ "data": [
            { "_id": "op-1",
              "toolId": { "name": "Hammer", "sku": "H1", "quantity": 10, "location": "A1" },
              "realStock": 10, "discrepancy": 0, "date": "2026-10-01T00:00:00Z" }
        ] }"#;
        let records: Vec<StockOpnameRecord> = decode(body).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_envelope_is_a_parse_error() {
        let err = decode::<Vec<Tool>>(br#"[]"#).unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[test]
    fn one_bad_record_rejects_the_whole_listing() {
        let body = br#"{ "data": [
            { "_id": "op-1", "toolId": null, "realStock": 1 },
            { "_id": "op-2", "toolId": null, "realStock": -1 }
        ] }"#;
        let err = decode::<Vec<StockOpnameRecord>>(body).unwrap_err();
        assert!(matches!(err, ClientError::Invalid(_)));
    }

    #[test]
    fn null_data_is_rejected() {
        let err = decode::<Vec<Category>>(br#"{ "data": null }"#).unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }
}
