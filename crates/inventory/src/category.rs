use serde::{Deserialize, Serialize};

use gudang_core::{CategoryId, DomainError, DomainResult, Entity};

use crate::listing::Searchable;

/// Discipline a category belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryType {
    #[default]
    Mekanikal,
    Elektrikal,
}

/// Tool category as listed by `GET /category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub name: String,
    /// Short code assigned by the backend.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: CategoryType,
    /// Number of tools in the category.
    #[serde(default)]
    pub items: u64,
}

impl Category {
    pub fn validate(&self) -> DomainResult<()> {
        if !self.id.is_valid() {
            return Err(DomainError::invalid_id("category without _id"));
        }
        Ok(())
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Searchable for Category {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.code.as_str()]
    }
}

/// Display name of `id`, or `"Unknown"` when the category is not loaded.
pub fn category_name<'a>(categories: &'a [Category], id: &CategoryId) -> &'a str {
    categories
        .iter()
        .find(|c| &c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or("Unknown")
}

/// Body of `POST /category` and `PUT /category/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub note: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>, kind: CategoryType) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }
        Ok(Self {
            name,
            note: String::new(),
            kind,
        })
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}
