use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::enums::{DocumentStatus, OwnerType};

/// Identifier of a persisted document record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Who performed an upload or verification, normalized once at ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attribution {
    Attributed {
        user_id: Option<String>,
        display_name: String,
    },
    #[default]
    Unattributed,
}

impl Attribution {
    pub fn named(display_name: impl Into<String>) -> Self {
        Self::Attributed {
            user_id: None,
            display_name: display_name.into(),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Attributed { display_name, .. } => Some(display_name),
            Self::Unattributed => None,
        }
    }

    pub fn is_attributed(&self) -> bool {
        matches!(self, Self::Attributed { .. })
    }
}

/// Groups every version of "the same document": one owner, one document type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineageKey {
    pub owner_id: String,
    pub document_type: String,
}

impl LineageKey {
    pub fn new(owner_id: impl Into<String>, document_type: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            document_type: document_type.into(),
        }
    }

    pub fn matches(&self, doc: &Document) -> bool {
        doc.owner_id == self.owner_id && doc.document_type == self.document_type
    }
}

/// A persisted document record. Immutable: a new upload is a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub owner_id: String,
    pub owner_type: OwnerType,
    pub document_type: String,
    pub name: Option<String>,
    pub version: u32,
    pub status: DocumentStatus,
    pub is_current_for_case: bool,
    pub is_ad_hoc: bool,
    pub uploaded_by: Attribution,
    pub uploaded_date: Option<NaiveDateTime>,
    pub verified_by: Attribution,
    pub verified_date: Option<NaiveDateTime>,
    pub rejection_reason: Option<String>,
    pub comments: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub mime_type: Option<String>,
}

impl Document {
    /// Record with the identifying fields set and every audit field empty.
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        owner_type: OwnerType,
        document_type: impl Into<String>,
        version: u32,
        status: DocumentStatus,
    ) -> Self {
        Self {
            id: DocumentId::new(id),
            owner_id: owner_id.into(),
            owner_type,
            document_type: document_type.into(),
            name: None,
            version,
            status,
            is_current_for_case: false,
            is_ad_hoc: false,
            uploaded_by: Attribution::Unattributed,
            uploaded_date: None,
            verified_by: Attribution::Unattributed,
            verified_date: None,
            rejection_reason: None,
            comments: None,
            expiry_date: None,
            mime_type: None,
        }
    }

    pub fn lineage_key(&self) -> LineageKey {
        LineageKey::new(&self.owner_id, &self.document_type)
    }

    /// Display name, falling back to the document type when none was recorded.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.document_type)
    }
}
