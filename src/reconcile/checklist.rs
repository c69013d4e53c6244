//! Templated checklist materialization.
//!
//! Every template entry yields exactly one row, in template order, whether the
//! owner has uploaded zero, one or many versions of that document type.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::resolver::{lineage_versions, resolve};
use crate::models::{
    ChecklistRow, ChecklistSection, Document, DocumentStatus, OwnerRef, RequirementEntry,
    RequirementTemplate,
};

/// Build the per-category checklist for one owner.
pub fn build(
    template: &RequirementTemplate,
    documents: &[Document],
    owner: &OwnerRef,
) -> Vec<ChecklistSection> {
    let _span = tracing::debug_span!("build_checklist", owner_id = %owner.id).entered();

    let mut by_type: HashMap<&str, Vec<&Document>> = HashMap::new();
    for doc in documents.iter().filter(|d| owner.owns(d)) {
        by_type.entry(doc.document_type.as_str()).or_default().push(doc);
    }

    let sections: Vec<ChecklistSection> = template
        .categories
        .iter()
        .map(|category| {
            warn_duplicate_entries(owner, &category.name, &category.entries);
            ChecklistSection {
                category: category.name.clone(),
                rows: category
                    .entries
                    .iter()
                    .map(|entry| build_row(owner, entry, by_type.get(entry.document_type.as_str())))
                    .collect(),
            }
        })
        .collect();

    tracing::debug!(
        sections = sections.len(),
        rows = template.entry_count(),
        "Checklist built"
    );
    sections
}

fn build_row(
    owner: &OwnerRef,
    entry: &RequirementEntry,
    records: Option<&Vec<&Document>>,
) -> ChecklistRow {
    let versions = records
        .map(|r| lineage_versions(r.iter().copied()))
        .unwrap_or_default();

    match resolve(&versions).cloned() {
        Some(current) => ChecklistRow::resolved(owner, entry.required, false, current, versions),
        None => ChecklistRow::missing(owner, &entry.document_type, entry.required),
    }
}

fn warn_duplicate_entries(owner: &OwnerRef, category: &str, entries: &[RequirementEntry]) {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.document_type.as_str()) {
            tracing::warn!(
                owner_id = %owner.id,
                category,
                document_type = %entry.document_type,
                "Template lists the same document type twice in one category"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Progress counts for a checklist header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSummary {
    pub total: u32,
    pub required: u32,
    pub missing_required: u32,
    pub pending: u32,
    pub verified: u32,
    pub rejected: u32,
    pub expired: u32,
    required_verified: u32,
}

impl ChecklistSummary {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a ChecklistRow>) -> Self {
        let mut summary = Self::default();
        for row in rows {
            summary.total += 1;
            if row.required {
                summary.required += 1;
            }
            match row.status {
                DocumentStatus::Missing if row.required => summary.missing_required += 1,
                DocumentStatus::Missing => {}
                DocumentStatus::Pending => summary.pending += 1,
                DocumentStatus::Verified => {
                    summary.verified += 1;
                    if row.required {
                        summary.required_verified += 1;
                    }
                }
                DocumentStatus::Rejected => summary.rejected += 1,
                DocumentStatus::Expired => summary.expired += 1,
            }
        }
        summary
    }

    /// Every required row is verified.
    pub fn is_complete(&self) -> bool {
        self.required_verified == self.required
    }
}

pub fn summarize(sections: &[ChecklistSection]) -> ChecklistSummary {
    ChecklistSummary::from_rows(sections.iter().flat_map(|s| s.rows.iter()))
}
