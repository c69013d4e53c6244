//! Document version reconciliation and checklist materialization.
//!
//! Turns a flat, append-only document collection into the views the case
//! screens render. Every pass is a pure, synchronous function of its inputs:
//! no I/O, no shared state, safe to re-run on every collection refresh.
//!
//! ```text
//! documents ─┬─> resolver ─> checklist::build ─> Vec<ChecklistSection>
//!            └─> resolver ─> adhoc::assemble  ─> Vec<ChecklistRow>
//!                                                   │
//!                          history::history <───────┤
//!                          preview::build_index <───┘
//! ```

pub mod adhoc;
pub mod checklist;
pub mod history;
pub mod preview;
pub mod resolver;

pub use adhoc::assemble;
pub use checklist::{build, summarize, ChecklistSummary};
pub use history::history;
pub use preview::{build_index, index_of, PreviewCursor, PreviewIndex, PreviewableRow};
pub use resolver::{lineage_versions, resolve};
