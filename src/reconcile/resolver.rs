//! Current-version resolution for a single lineage.
//!
//! Resolution order:
//! 1. Highest version flagged `is_current_for_case`
//! 2. Highest version overall
//! 3. Nothing (empty lineage)

use std::cmp::Ordering;

use crate::models::Document;

/// Canonical lineage order: version descending. Version ties only occur on
/// malformed input; they break on the current flag, then on id.
pub(crate) fn lineage_order(a: &Document, b: &Document) -> Ordering {
    b.version
        .cmp(&a.version)
        .then_with(|| b.is_current_for_case.cmp(&a.is_current_for_case))
        .then_with(|| a.id.cmp(&b.id))
}

/// Pick the authoritative record among all versions of one lineage.
///
/// Never mutates `records`. When more than one record is flagged current the
/// highest-versioned flagged record wins and a warning is traced.
pub fn resolve(records: &[Document]) -> Option<&Document> {
    let mut ordered: Vec<&Document> = records.iter().collect();
    ordered.sort_by(|a, b| lineage_order(a, b));

    let flagged = ordered.iter().filter(|d| d.is_current_for_case).count();
    if flagged > 1 {
        if let Some(first) = ordered.first() {
            tracing::warn!(
                owner_id = %first.owner_id,
                document_type = %first.document_type,
                flagged,
                "Multiple versions flagged current, using highest flagged version"
            );
        }
    }

    ordered
        .iter()
        .find(|d| d.is_current_for_case)
        .or_else(|| ordered.first())
        .copied()
}

/// Every version of one lineage, cloned, strictly descending by version.
///
/// Duplicate version numbers keep the record that sorts first under
/// the lineage order, so the resolved record is always part of the output.
pub fn lineage_versions<'a>(records: impl IntoIterator<Item = &'a Document>) -> Vec<Document> {
    let mut ordered: Vec<&Document> = records.into_iter().collect();
    ordered.sort_by(|a, b| lineage_order(a, b));

    let before = ordered.len();
    ordered.dedup_by_key(|d| d.version);
    if ordered.len() < before {
        if let Some(first) = ordered.first() {
            tracing::warn!(
                owner_id = %first.owner_id,
                document_type = %first.document_type,
                dropped = before - ordered.len(),
                "Duplicate version numbers in lineage, keeping one record per version"
            );
        }
    }

    ordered.into_iter().cloned().collect()
}
