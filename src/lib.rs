pub mod config;
pub mod error;
pub mod models;
pub mod ingest; // Raw collection normalization
pub mod placeholders; // Client-side ad-hoc placeholders
pub mod reconcile; // Resolution, checklists, history, preview
pub mod template_cache; // Owned requirement-template cache

pub use error::{ReconcileError, TemplateError};
pub use models::{
    Attribution, ChecklistRow, ChecklistSection, Document, DocumentId, DocumentStatus,
    LineageKey, OwnerRef, OwnerType, PlaceholderId, RequirementEntry, RequirementTemplate, RowId,
};
pub use placeholders::{PlaceholderRow, PlaceholderSet};
pub use reconcile::{
    assemble, build, build_index, history, index_of, resolve, summarize, ChecklistSummary,
    PreviewCursor, PreviewIndex, PreviewableRow,
};
pub use template_cache::{JsonTemplateSource, TemplateCache, TemplateSource};

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber for embedding applications and tools.
///
/// Honors `RUST_LOG`, falling back to `config::default_log_filter()`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
