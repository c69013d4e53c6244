//! Preview sequencing over checklist rows.
//!
//! `build_index` materializes the rows that have uploaded content, keeping
//! their checklist order, so the preview pane can step next/previous by index.
//! The index is a snapshot: a `PreviewCursor` never re-reads the row set on its
//! own. Callers that receive a refreshed collection while a preview is open
//! call `PreviewCursor::refresh` to re-resolve the open document explicitly.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{ChecklistRow, Document, LineageKey, RowId};

/// A checklist row with content to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewableRow {
    pub position: usize,
    pub row_id: RowId,
    pub lineage: LineageKey,
    pub name: String,
    pub document: Document,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreviewIndex {
    rows: Vec<PreviewableRow>,
}

/// Build the previewable subset of `rows`. `Missing` rows are skipped.
///
/// Rows sharing a row id (a template listing one document type twice) are
/// previewed once, at the first occurrence.
pub fn build_index(rows: &[ChecklistRow]) -> PreviewIndex {
    let mut seen = HashSet::new();
    let rows = rows
        .iter()
        .filter(|row| row.status.has_content())
        .filter_map(|row| row.current.as_ref().map(|doc| (row, doc)))
        .filter(|&(row, _)| {
            let first = seen.insert(&row.id);
            if !first {
                tracing::debug!(row_id = ?row.id, "Duplicate row skipped in preview index");
            }
            first
        })
        .enumerate()
        .map(|(position, (row, doc))| PreviewableRow {
            position,
            row_id: row.id.clone(),
            lineage: row.lineage_key(),
            name: row.name.clone(),
            document: doc.clone(),
        })
        .collect();
    PreviewIndex { rows }
}

/// Position of `target` in `index`, or `None` when it is not previewable.
pub fn index_of(index: &PreviewIndex, target: &ChecklistRow) -> Option<usize> {
    index.position_of(&target.id)
}

impl PreviewIndex {
    pub fn position_of(&self, row_id: &RowId) -> Option<usize> {
        self.rows.iter().position(|r| &r.row_id == row_id)
    }

    fn position_of_lineage(&self, lineage: &LineageKey) -> Option<usize> {
        self.rows.iter().position(|r| &r.lineage == lineage)
    }

    pub fn get(&self, position: usize) -> Option<&PreviewableRow> {
        self.rows.get(position)
    }

    pub fn rows(&self) -> &[PreviewableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Navigation state of an open preview. Holds its own frozen index.
#[derive(Debug, Clone)]
pub struct PreviewCursor {
    index: PreviewIndex,
    position: usize,
}

impl PreviewCursor {
    /// Open the preview at `target`. `None` if the row has nothing to show.
    pub fn open(index: PreviewIndex, target: &ChecklistRow) -> Option<Self> {
        let position = index_of(&index, target)?;
        Some(Self { index, position })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn current(&self) -> &PreviewableRow {
        // position < len is upheld by every constructor and move.
        &self.index.rows[self.position]
    }

    pub fn has_next(&self) -> bool {
        self.position + 1 < self.index.len()
    }

    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Step forward. Stays put and returns `None` at the last row.
    pub fn move_next(&mut self) -> Option<&PreviewableRow> {
        if !self.has_next() {
            return None;
        }
        self.position += 1;
        Some(self.current())
    }

    /// Step back. Stays put and returns `None` at the first row.
    pub fn move_previous(&mut self) -> Option<&PreviewableRow> {
        if !self.has_previous() {
            return None;
        }
        self.position -= 1;
        Some(self.current())
    }

    /// Rebuild against a newer row set and re-locate the open document.
    ///
    /// Lookup order:
    /// 1. Same row identifier
    /// 2. Same lineage (a newer version replaced the open one)
    /// 3. Nearest surviving position
    ///
    /// Returns `None` when nothing is previewable any more.
    pub fn refresh(self, rows: &[ChecklistRow]) -> Option<Self> {
        let index = build_index(rows);
        if index.is_empty() {
            tracing::debug!("Preview closed, no previewable rows after refresh");
            return None;
        }

        let open = self.current();
        let position = index
            .position_of(&open.row_id)
            .or_else(|| index.position_of_lineage(&open.lineage))
            .unwrap_or_else(|| self.position.min(index.len() - 1));

        tracing::debug!(
            from = self.position,
            to = position,
            rows = index.len(),
            "Preview cursor re-resolved"
        );
        Some(Self { index, position })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DocumentStatus, OwnerRef, OwnerType, RequirementEntry, RequirementTemplate,
    };
    use crate::reconcile::build;

    fn make_doc(id: &str, doc_type: &str, version: u32, status: DocumentStatus) -> Document {
        Document::new(id, "case-1", OwnerType::Case, doc_type, version, status)
    }

    fn template() -> RequirementTemplate {
        RequirementTemplate::new().with_category(
            "Identity",
            vec![
                RequirementEntry::required("Passport"),
                RequirementEntry::required("Utility Bill"),
                RequirementEntry::required("Bank Statement"),
                RequirementEntry::optional("Driving Licence"),
            ],
        )
    }

    fn rows(docs: &[Document]) -> Vec<ChecklistRow> {
        build(&template(), docs, &OwnerRef::case("case-1"))
            .into_iter()
            .flat_map(|s| s.rows)
            .collect()
    }

    fn sample_docs() -> Vec<Document> {
        vec![
            make_doc("p1", "Passport", 1, DocumentStatus::Verified),
            make_doc("b1", "Bank Statement", 1, DocumentStatus::Rejected),
            make_doc("d1", "Driving Licence", 1, DocumentStatus::Pending),
        ]
    }

    #[test]
    fn missing_rows_are_excluded_and_order_kept() {
        let index = build_index(&rows(&sample_docs()));
        let names: Vec<&str> = index.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Passport", "Bank Statement", "Driving Licence"]);
        let positions: Vec<usize> = index.rows().iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn index_of_maps_row_to_position() {
        let all = rows(&sample_docs());
        let index = build_index(&all);
        assert_eq!(index_of(&index, &all[0]), Some(0));
        assert_eq!(index_of(&index, &all[2]), Some(1));
        assert_eq!(index_of(&index, &all[3]), Some(2));
    }

    #[test]
    fn missing_row_is_not_found() {
        let all = rows(&sample_docs());
        let index = build_index(&all);
        assert_eq!(all[1].status, DocumentStatus::Missing);
        assert_eq!(index_of(&index, &all[1]), None);
        assert!(PreviewCursor::open(index, &all[1]).is_none());
    }

    #[test]
    fn duplicate_template_entries_share_one_preview_entry() {
        let template = RequirementTemplate::new().with_category(
            "Identity",
            vec![
                RequirementEntry::required("Passport"),
                RequirementEntry::required("Passport"),
                RequirementEntry::required("Bank Statement"),
            ],
        );
        let docs = vec![
            make_doc("p1", "Passport", 1, DocumentStatus::Verified),
            make_doc("b1", "Bank Statement", 1, DocumentStatus::Pending),
        ];
        let all: Vec<ChecklistRow> = build(&template, &docs, &OwnerRef::case("case-1"))
            .into_iter()
            .flat_map(|s| s.rows)
            .collect();
        assert_eq!(all.len(), 3);

        let index = build_index(&all);
        assert_eq!(index.len(), 2);
        assert_eq!(index_of(&index, &all[0]), Some(0));
        assert_eq!(index_of(&index, &all[1]), Some(0));
        assert_eq!(index_of(&index, &all[2]), Some(1));

        let cursor = PreviewCursor::open(index, &all[1]).unwrap();
        assert_eq!(cursor.current().document.id.as_str(), "p1");
        assert!(cursor.has_next());
    }

    #[test]
    fn cursor_steps_without_wrapping() {
        let all = rows(&sample_docs());
        let mut cursor = PreviewCursor::open(build_index(&all), &all[0]).unwrap();
        assert!(!cursor.has_previous());
        assert!(cursor.move_previous().is_none());
        assert_eq!(cursor.position(), 0);

        assert_eq!(cursor.move_next().unwrap().name, "Bank Statement");
        assert_eq!(cursor.move_next().unwrap().name, "Driving Licence");
        assert!(cursor.move_next().is_none());
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.move_previous().unwrap().position, 1);
    }

    #[test]
    fn cursor_snapshot_survives_source_changes() {
        let mut all = rows(&sample_docs());
        let cursor = PreviewCursor::open(build_index(&all), &all[2]).unwrap();
        all.clear();
        assert_eq!(cursor.current().name, "Bank Statement");
        assert_eq!(cursor.len(), 3);
    }

    #[test]
    fn refresh_follows_new_version_of_open_document() {
        let mut docs = sample_docs();
        let before = rows(&docs);
        let cursor = PreviewCursor::open(build_index(&before), &before[2]).unwrap();

        docs.push(make_doc("u1", "Utility Bill", 1, DocumentStatus::Pending));
        docs.push(make_doc("b2", "Bank Statement", 2, DocumentStatus::Pending));
        let cursor = cursor.refresh(&rows(&docs)).unwrap();

        assert_eq!(cursor.current().document.id.as_str(), "b2");
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.len(), 4);
    }

    #[test]
    fn refresh_clamps_when_open_row_disappears() {
        let docs = sample_docs();
        let before = rows(&docs);
        let cursor = PreviewCursor::open(build_index(&before), &before[3]).unwrap();

        let shrunk: Vec<Document> = docs
            .into_iter()
            .filter(|d| d.document_type == "Passport")
            .collect();
        let cursor = cursor.refresh(&rows(&shrunk)).unwrap();
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.current().name, "Passport");
    }

    #[test]
    fn refresh_closes_when_nothing_previewable() {
        let before = rows(&sample_docs());
        let cursor = PreviewCursor::open(build_index(&before), &before[0]).unwrap();
        assert!(cursor.refresh(&rows(&[])).is_none());
    }
}
