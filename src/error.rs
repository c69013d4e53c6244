//! Error types for the ingestion boundary and the template cache.
//!
//! The reconciliation passes themselves never fail: malformed but well-typed
//! input degrades to defaults. Errors only surface where raw collaborator data
//! is parsed or a template source is consulted.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Requirement template has no categories")]
    EmptyTemplate,
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("No requirement template defined for role {0}")]
    UnknownRole(String),

    #[error("Malformed requirement template: {0}")]
    Malformed(#[from] ReconcileError),
}
