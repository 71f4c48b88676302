use serde::{Deserialize, Serialize};

use gudang_core::{CategoryId, DomainError, DomainResult, Entity, ToolId};

use crate::category::{Category, category_name};
use crate::listing::{Searchable, matches};

/// Tool (inventory item) as listed by `GET /tool`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(rename = "_id")]
    pub id: ToolId,
    pub name: String,
    pub sku: String,
    pub category_id: CategoryId,
    pub quantity: i64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// File name of the uploaded picture, served from the backend's public dir.
    #[serde(default)]
    pub image: Option<String>,
}

impl Tool {
    pub fn validate(&self) -> DomainResult<()> {
        if !self.id.is_valid() {
            return Err(DomainError::invalid_id("tool without _id"));
        }
        if self.quantity < 0 {
            return Err(DomainError::invariant(format!(
                "tool {}: negative quantity {}",
                self.id, self.quantity
            )));
        }
        Ok(())
    }
}

impl Entity for Tool {
    type Id = ToolId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Searchable for Tool {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.sku.as_str(), self.location.as_deref().unwrap_or("")]
    }
}

/// Tools matching `term` by name, SKU, location, or the name of their category.
pub fn search_tools<'a>(tools: &'a [Tool], categories: &[Category], term: &str) -> Vec<&'a Tool> {
    tools
        .iter()
        .filter(|tool| {
            matches(*tool, term)
                || category_name(categories, &tool.category_id)
                    .to_lowercase()
                    .contains(&term.to_lowercase())
        })
        .collect()
}

/// Body of `POST /tool` and `PUT /tool/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDraft {
    pub name: String,
    pub category_id: CategoryId,
    pub location: String,
    pub note: String,
    pub quantity: i64,
}

impl ToolDraft {
    pub fn new(
        name: impl Into<String>,
        category_id: CategoryId,
        quantity: i64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("tool name cannot be empty"));
        }
        if quantity < 0 {
            return Err(DomainError::validation("tool quantity cannot be negative"));
        }
        Ok(Self {
            name,
            category_id,
            location: String::new(),
            note: String::new(),
            quantity,
        })
    }

    /// Rack locations are stored upper-cased.
    pub fn with_location(mut self, location: impl AsRef<str>) -> Self {
        self.location = location.as_ref().trim().to_uppercase();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryType;

    fn tool(name: &str, category: &str, location: Option<&str>) -> Tool {
        Tool {
            id: ToolId::new(format!("t-{name}")).unwrap(),
            name: name.to_string(),
            sku: format!("{}-01", &name[..1]),
            category_id: CategoryId::new(category).unwrap(),
            quantity: 3,
            location: location.map(str::to_string),
            note: None,
            image: None,
        }
    }

    #[test]
    fn draft_normalises_location() {
        let draft = ToolDraft::new("Drill", CategoryId::new("c1").unwrap(), 2)
            .unwrap()
            .with_location(" rack b2 ");
        assert_eq!(draft.location, "RACK B2");

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["categoryId"], "c1");
    }

    #[test]
    fn draft_rejects_blank_name_and_negative_quantity() {
        let cat = CategoryId::new("c1").unwrap();
        assert!(ToolDraft::new(" ", cat.clone(), 1).is_err());
        assert!(ToolDraft::new("Saw", cat, -1).is_err());
    }

    #[test]
    fn search_includes_category_name() {
        let categories = vec![Category {
            id: CategoryId::new("c-elec").unwrap(),
            name: "Multimeters".to_string(),
            code: "MM".to_string(),
            note: None,
            kind: CategoryType::Elektrikal,
            items: 1,
        }];
        let tools = vec![tool("Fluke", "c-elec", None), tool("Hammer", "c-mech", Some("A1"))];

        let hits = search_tools(&tools, &categories, "multi");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Fluke");

        assert_eq!(search_tools(&tools, &categories, "a1")[0].name, "Hammer");
    }
}
