//! Client-side placeholder rows for ad-hoc documents not yet uploaded.
//!
//! Owned by the caller holding the ad-hoc view. The reconciliation passes only
//! read the set; creating and removing entries happens here.
//!
//! Key properties:
//! - Identifiers are `new-adhoc-<unix millis>`, strictly increasing per set
//! - An identifier is never reused, even after removal
//! - Removal is by identifier and idempotent

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ChecklistRow, DocumentStatus, OwnerRef, PlaceholderId, RowId};

/// A declared intent to upload a new ad-hoc document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderRow {
    pub id: PlaceholderId,
    pub document_type: String,
    pub created_at: DateTime<Utc>,
}

impl PlaceholderRow {
    /// Render as a `Missing` ad-hoc checklist row stamped with `owner`.
    pub fn to_row(&self, owner: &OwnerRef) -> ChecklistRow {
        ChecklistRow {
            id: RowId::Placeholder {
                id: self.id.clone(),
            },
            owner_id: owner.id.clone(),
            owner_type: owner.owner_type,
            owner_name: owner.display_name.clone(),
            name: self.document_type.clone(),
            document_type: self.document_type.clone(),
            required: false,
            is_ad_hoc: true,
            status: DocumentStatus::Missing,
            current: None,
            all_versions: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PlaceholderSet {
    rows: Vec<PlaceholderRow>,
    last_stamp: i64,
}

impl PlaceholderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, document_type: impl Into<String>) -> PlaceholderId {
        self.create_at(document_type, Utc::now())
    }

    /// Create with an explicit clock reading.
    pub fn create_at(
        &mut self,
        document_type: impl Into<String>,
        now: DateTime<Utc>,
    ) -> PlaceholderId {
        let stamp = now.timestamp_millis().max(self.last_stamp + 1);
        self.last_stamp = stamp;

        let id = PlaceholderId::from_stamp(stamp);
        self.rows.push(PlaceholderRow {
            id: id.clone(),
            document_type: document_type.into(),
            created_at: now,
        });
        tracing::debug!(placeholder_id = %id, "Placeholder created");
        id
    }

    /// Remove by identifier. Returns whether anything was removed.
    pub fn remove(&mut self, id: &PlaceholderId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|p| &p.id != id);
        let removed = self.rows.len() < before;
        if removed {
            tracing::debug!(placeholder_id = %id, "Placeholder removed");
        }
        removed
    }

    /// Change the document type the user picked for a placeholder.
    pub fn retype(&mut self, id: &PlaceholderId, document_type: impl Into<String>) -> bool {
        match self.rows.iter_mut().find(|p| &p.id == id) {
            Some(row) => {
                row.document_type = document_type.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &PlaceholderId) -> Option<&PlaceholderRow> {
        self.rows.iter().find(|p| &p.id == id)
    }

    /// Placeholders in creation order.
    pub fn rows(&self) -> &[PlaceholderRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop every placeholder. Issued identifiers stay retired.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
