use serde::{Deserialize, Serialize};

use crate::error::ReconcileError;

/// One required (or optional) document type within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementEntry {
    pub document_type: String,
    pub required: bool,
}

impl RequirementEntry {
    pub fn required(document_type: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            required: true,
        }
    }

    pub fn optional(document_type: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCategory {
    pub name: String,
    pub entries: Vec<RequirementEntry>,
}

/// Ordered, categorized list of document types an owner must provide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementTemplate {
    pub categories: Vec<TemplateCategory>,
}

/// Wire shape of a template entry: `{ "documentType": "...", "required": bool }`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    document_type: String,
    #[serde(default = "default_required")]
    required: bool,
}

fn default_required() -> bool {
    true
}

impl RequirementTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category. Builder style, keeps insertion order.
    pub fn with_category(
        mut self,
        name: impl Into<String>,
        entries: Vec<RequirementEntry>,
    ) -> Self {
        self.categories.push(TemplateCategory {
            name: name.into(),
            entries,
        });
        self
    }

    /// Parse the object form `{ "<category>": [ { documentType, required } ] }`.
    ///
    /// Category order follows the order keys appear in the source text.
    pub fn from_json(json: &str) -> Result<Self, ReconcileError> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        if object.is_empty() {
            return Err(ReconcileError::EmptyTemplate);
        }

        let mut categories = Vec::with_capacity(object.len());
        for (name, value) in object {
            if !value.is_array() {
                return Err(ReconcileError::InvalidRecord {
                    id: name,
                    reason: "category value must be an array of entries".into(),
                });
            }
            let raw: Vec<RawEntry> = serde_json::from_value(value)?;
            categories.push(TemplateCategory {
                name,
                entries: raw
                    .into_iter()
                    .map(|e| RequirementEntry {
                        document_type: e.document_type,
                        required: e.required,
                    })
                    .collect(),
            });
        }
        Ok(Self { categories })
    }

    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }
}
