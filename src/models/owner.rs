use serde::{Deserialize, Serialize};

use super::document::{Document, LineageKey};
use super::enums::OwnerType;

/// The case or party whose checklist is being materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub id: String,
    pub owner_type: OwnerType,
    pub display_name: Option<String>,
}

impl OwnerRef {
    pub fn case(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_type: OwnerType::Case,
            display_name: None,
        }
    }

    pub fn party(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_type: OwnerType::Party,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn owns(&self, doc: &Document) -> bool {
        doc.owner_id == self.id
    }

    pub fn lineage(&self, document_type: &str) -> LineageKey {
        LineageKey::new(&self.id, document_type)
    }
}
