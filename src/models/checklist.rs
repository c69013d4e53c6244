use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::document::{Attribution, Document, DocumentId, LineageKey};
use super::enums::{DocumentStatus, OwnerType};
use super::owner::OwnerRef;
use crate::config::PLACEHOLDER_ID_PREFIX;

/// Synthetic identifier of a client-side placeholder row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderId(String);

impl PlaceholderId {
    pub(crate) fn from_stamp(stamp: i64) -> Self {
        Self(format!("{PLACEHOLDER_ID_PREFIX}{stamp}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for identifiers minted by a placeholder set, never for persisted ids.
    pub fn is_placeholder(id: &str) -> bool {
        id.strip_prefix(PLACEHOLDER_ID_PREFIX)
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl std::fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a checklist row across reconciliation passes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowId {
    /// Row backed by a persisted record (its current version).
    Document { id: DocumentId },
    /// Requirement with nothing uploaded yet.
    Requirement { key: LineageKey },
    Placeholder { id: PlaceholderId },
}

/// View-model row for one requirement or ad-hoc document type.
///
/// `current` is `None` exactly when the row is `Missing`, so a missing row
/// structurally carries no version, upload date or attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistRow {
    pub id: RowId,
    pub owner_id: String,
    pub owner_type: OwnerType,
    pub owner_name: Option<String>,
    pub name: String,
    pub document_type: String,
    pub required: bool,
    pub is_ad_hoc: bool,
    pub status: DocumentStatus,
    pub current: Option<Document>,
    /// Every version of the lineage, strictly descending by version.
    pub all_versions: Vec<Document>,
}

impl ChecklistRow {
    pub(crate) fn resolved(
        owner: &OwnerRef,
        required: bool,
        is_ad_hoc: bool,
        current: Document,
        all_versions: Vec<Document>,
    ) -> Self {
        Self {
            id: RowId::Document {
                id: current.id.clone(),
            },
            owner_id: owner.id.clone(),
            owner_type: owner.owner_type,
            owner_name: owner.display_name.clone(),
            name: current.display_name().to_string(),
            document_type: current.document_type.clone(),
            required,
            is_ad_hoc,
            status: current.status,
            current: Some(current),
            all_versions,
        }
    }

    pub(crate) fn missing(owner: &OwnerRef, document_type: &str, required: bool) -> Self {
        Self {
            id: RowId::Requirement {
                key: owner.lineage(document_type),
            },
            owner_id: owner.id.clone(),
            owner_type: owner.owner_type,
            owner_name: owner.display_name.clone(),
            name: document_type.to_string(),
            document_type: document_type.to_string(),
            required,
            is_ad_hoc: false,
            status: DocumentStatus::Missing,
            current: None,
            all_versions: Vec::new(),
        }
    }

    pub fn lineage_key(&self) -> LineageKey {
        LineageKey::new(&self.owner_id, &self.document_type)
    }

    pub fn is_missing(&self) -> bool {
        self.current.is_none()
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.id, RowId::Placeholder { .. })
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        self.current.as_ref().map(|d| &d.id)
    }

    pub fn version(&self) -> Option<u32> {
        self.current.as_ref().map(|d| d.version)
    }

    pub fn uploaded_date(&self) -> Option<NaiveDateTime> {
        self.current.as_ref().and_then(|d| d.uploaded_date)
    }

    pub fn uploaded_by(&self) -> Option<&Attribution> {
        self.current.as_ref().map(|d| &d.uploaded_by)
    }
}

/// One template category with its rows in template order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSection {
    pub category: String,
    pub rows: Vec<ChecklistRow>,
}
