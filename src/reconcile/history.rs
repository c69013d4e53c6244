//! Version history for a checklist row.

use super::resolver::lineage_versions;
use crate::models::{ChecklistRow, Document};

/// Full version history of the row's lineage, strictly descending by version.
///
/// Rows built by this crate already carry their lineage in `all_versions`.
/// Rows without one (missing requirements, placeholders, rows deserialized from
/// elsewhere) fall back to filtering `documents` by the row's lineage key. Every
/// status is kept, rejected and expired versions included. A row with no
/// matching records yields an empty history.
pub fn history(row: &ChecklistRow, documents: &[Document]) -> Vec<Document> {
    if !row.all_versions.is_empty() {
        return row.all_versions.clone();
    }

    let key = row.lineage_key();
    lineage_versions(documents.iter().filter(|d| key.matches(d)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DocumentStatus, OwnerRef, OwnerType, RequirementEntry, RequirementTemplate,
    };
    use crate::placeholders::PlaceholderSet;
    use crate::reconcile::{assemble, build};

    fn audit_report(id: &str, version: u32, status: DocumentStatus, current: bool) -> Document {
        let mut doc = Document::new(id, "case-1", OwnerType::Case, "Audit Report", version, status);
        doc.is_current_for_case = current;
        doc
    }

    fn audit_trail() -> Vec<Document> {
        vec![
            audit_report("r1", 1, DocumentStatus::Rejected, false),
            audit_report("r3", 3, DocumentStatus::Verified, true),
            audit_report("r2", 2, DocumentStatus::Rejected, false),
        ]
    }

    #[test]
    fn history_lists_every_version_newest_first() {
        let owner = OwnerRef::case("case-1");
        let template = RequirementTemplate::new()
            .with_category("Financial", vec![RequirementEntry::required("Audit Report")]);
        let docs = audit_trail();

        let sections = build(&template, &docs, &owner);
        let row = &sections[0].rows[0];
        assert_eq!(row.document_id().unwrap().as_str(), "r3");

        let trail = history(row, &docs);
        let ids: Vec<&str> = trail.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["r3", "r2", "r1"]);
    }

    #[test]
    fn history_falls_back_to_collection_when_row_has_no_versions() {
        let mut docs = audit_trail();
        docs.push(Document::new(
            "x1",
            "case-2",
            OwnerType::Case,
            "Audit Report",
            9,
            DocumentStatus::Pending,
        ));
        docs.push(Document::new(
            "x2",
            "case-1",
            OwnerType::Case,
            "Passport",
            4,
            DocumentStatus::Pending,
        ));

        let mut set = PlaceholderSet::new();
        set.create("Audit Report");
        let row = set.rows()[0].to_row(&OwnerRef::case("case-1"));

        let versions: Vec<u32> = history(&row, &docs).iter().map(|d| d.version).collect();
        assert_eq!(versions, vec![3, 2, 1]);
    }

    #[test]
    fn unrelated_row_has_empty_history() {
        let owner = OwnerRef::case("case-1");
        let rows = assemble(&[], &owner, &[]);
        assert!(rows.is_empty());

        let template = RequirementTemplate::new()
            .with_category("Identity", vec![RequirementEntry::required("Passport")]);
        let sections = build(&template, &[], &owner);
        assert!(history(&sections[0].rows[0], &audit_trail()).is_empty());
    }

    #[test]
    fn history_does_not_mutate_inputs() {
        let docs = audit_trail();
        let snapshot = docs.clone();
        let owner = OwnerRef::case("case-1");
        let template = RequirementTemplate::new()
            .with_category("Financial", vec![RequirementEntry::required("Audit Report")]);
        let row = build(&template, &docs, &owner).remove(0).rows.remove(0);
        let row_snapshot = row.clone();

        let _ = history(&row, &docs);
        assert_eq!(docs, snapshot);
        assert_eq!(row, row_snapshot);
    }
}
