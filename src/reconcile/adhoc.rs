//! Ad-hoc checklist assembly: persisted ad-hoc lineages plus pending placeholders.

use std::collections::HashMap;

use super::resolver::{lineage_versions, resolve};
use crate::models::{ChecklistRow, Document, OwnerRef};
use crate::placeholders::PlaceholderRow;

/// One row per distinct ad-hoc document type the owner has uploaded, in order
/// of first appearance, followed by `pending_placeholders` in creation order.
///
/// A placeholder whose type matches a freshly persisted lineage is still
/// emitted; clearing it after upload confirmation is the caller's job.
pub fn assemble(
    documents: &[Document],
    owner: &OwnerRef,
    pending_placeholders: &[PlaceholderRow],
) -> Vec<ChecklistRow> {
    let _span = tracing::debug_span!("assemble_ad_hoc", owner_id = %owner.id).entered();

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Document>> = HashMap::new();
    for doc in documents.iter().filter(|d| d.is_ad_hoc && owner.owns(d)) {
        let key = doc.document_type.as_str();
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(doc);
    }

    let mut rows: Vec<ChecklistRow> = Vec::with_capacity(order.len() + pending_placeholders.len());
    for key in order {
        let versions = lineage_versions(groups.remove(key).unwrap_or_default());
        if let Some(current) = resolve(&versions).cloned() {
            rows.push(ChecklistRow::resolved(owner, false, true, current, versions));
        }
    }
    let persisted = rows.len();

    rows.extend(pending_placeholders.iter().map(|p| p.to_row(owner)));

    tracing::debug!(
        persisted,
        placeholders = pending_placeholders.len(),
        "Ad-hoc rows assembled"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentStatus, OwnerType, RowId};
    use crate::placeholders::PlaceholderSet;
    use chrono::{TimeZone, Utc};

    fn make_ad_hoc(id: &str, doc_type: &str, version: u32, status: DocumentStatus) -> Document {
        let mut doc = Document::new(id, "party-1", OwnerType::Party, doc_type, version, status);
        doc.is_ad_hoc = true;
        doc
    }

    #[test]
    fn groups_persisted_records_by_type() {
        let owner = OwnerRef::party("party-1");
        let docs = vec![
            make_ad_hoc("a1", "Board Resolution", 1, DocumentStatus::Rejected),
            make_ad_hoc("b1", "Trust Deed", 1, DocumentStatus::Pending),
            make_ad_hoc("a2", "Board Resolution", 2, DocumentStatus::Pending),
        ];
        let rows = assemble(&docs, &owner, &[]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].document_type, "Board Resolution");
        assert_eq!(rows[0].version(), Some(2));
        assert_eq!(rows[0].all_versions.len(), 2);
        assert_eq!(rows[1].document_type, "Trust Deed");
        assert!(rows.iter().all(|r| r.is_ad_hoc && !r.required));
    }

    #[test]
    fn templated_and_foreign_documents_are_excluded() {
        let owner = OwnerRef::party("party-1");
        let templated = Document::new(
            "t1",
            "party-1",
            OwnerType::Party,
            "Passport",
            1,
            DocumentStatus::Verified,
        );
        let mut foreign = make_ad_hoc("f1", "Trust Deed", 1, DocumentStatus::Pending);
        foreign.owner_id = "party-2".into();

        let rows = assemble(&[templated, foreign], &owner, &[]);
        assert!(rows.is_empty());
    }

    #[test]
    fn placeholders_follow_persisted_rows_in_creation_order() {
        let owner = OwnerRef::party("party-1");
        let mut set = PlaceholderSet::new();
        let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let first = set.create_at("Lease Agreement", t0);
        let second = set.create_at("Source of Funds Letter", t0);

        let docs = vec![make_ad_hoc("b1", "Trust Deed", 1, DocumentStatus::Pending)];
        let rows = assemble(&docs, &owner, set.rows());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].document_type, "Trust Deed");
        assert_eq!(rows[1].id, RowId::Placeholder { id: first });
        assert_eq!(rows[2].id, RowId::Placeholder { id: second });
        assert_eq!(rows[1].status, DocumentStatus::Missing);
    }

    #[test]
    fn placeholder_is_replaced_by_persisted_row_after_removal() {
        let owner = OwnerRef::party("party-1");
        let mut set = PlaceholderSet::new();
        let id = set.create("Lease Agreement");

        // Upload confirmed, collection refreshed: both coexist until removal.
        let docs = vec![make_ad_hoc("l1", "Lease Agreement", 1, DocumentStatus::Pending)];
        assert_eq!(assemble(&docs, &owner, set.rows()).len(), 2);

        set.remove(&id);
        let rows = assemble(&docs, &owner, set.rows());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].document_type, "Lease Agreement");
        assert_eq!(rows[0].version(), Some(1));
        assert_eq!(rows[0].status, DocumentStatus::Pending);
        assert!(!rows[0].is_placeholder());
    }

    #[test]
    fn assemble_is_idempotent() {
        let owner = OwnerRef::party("party-1");
        let mut set = PlaceholderSet::new();
        set.create("Lease Agreement");
        let docs = vec![
            make_ad_hoc("a1", "Board Resolution", 1, DocumentStatus::Rejected),
            make_ad_hoc("a2", "Board Resolution", 2, DocumentStatus::Pending),
        ];
        assert_eq!(
            assemble(&docs, &owner, set.rows()),
            assemble(&docs, &owner, set.rows())
        );
    }
}
