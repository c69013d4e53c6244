//! Ingestion boundary: raw JSON document collections into canonical `Document`s.
//!
//! Collaborator payloads are loosely shaped. Identifiers arrive as strings or
//! numbers, attribution as a bare name or a user record, dates in several
//! formats. Everything is normalized here, once, so the reconciliation passes
//! only ever see one shape.
//!
//! A record that cannot be normalized is skipped and reported, never fatal for
//! the rest of the collection. Only a payload that is not a JSON array fails.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ReconcileError;
use crate::models::{Attribution, Document, DocumentId, DocumentStatus, OwnerType};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Read `Verified` records whose expiry date is before this day as `Expired`.
    pub as_of: Option<NaiveDate>,
}

/// A record left out of the collection, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAttribution {
    Name(String),
    Record(RawUser),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    id: Option<RawId>,
    user_id: Option<RawId>,
    display_name: Option<String>,
    name: Option<String>,
    username: Option<String>,
    email: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    id: RawId,
    owner_id: RawId,
    owner_type: String,
    document_type: String,
    name: Option<String>,
    version: Option<i64>,
    status: String,
    #[serde(default)]
    is_current_for_case: bool,
    #[serde(default)]
    is_ad_hoc: bool,
    uploaded_by: Option<RawAttribution>,
    uploaded_date: Option<String>,
    verified_by: Option<RawAttribution>,
    verified_date: Option<String>,
    rejection_reason: Option<String>,
    comments: Option<String>,
    expiry_date: Option<String>,
    mime_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Parse a JSON array of document records.
pub fn parse_documents(
    json: &str,
    options: &IngestOptions,
) -> Result<IngestOutcome, ReconcileError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(normalize_documents(values, options))
}

/// Normalize already-decoded records, skipping the ones that cannot be read.
pub fn normalize_documents(
    values: Vec<serde_json::Value>,
    options: &IngestOptions,
) -> IngestOutcome {
    let mut outcome = IngestOutcome::default();
    for value in values {
        let id = record_id(&value);
        match normalize_record(value, options) {
            Ok(doc) => outcome.documents.push(doc),
            Err(e) => {
                tracing::warn!(
                    id = id.as_deref().unwrap_or("<none>"),
                    error = %e,
                    "Skipping document record"
                );
                outcome.skipped.push(SkippedRecord {
                    id,
                    reason: e.to_string(),
                });
            }
        }
    }
    tracing::debug!(
        accepted = outcome.documents.len(),
        skipped = outcome.skipped.len(),
        "Document collection ingested"
    );
    outcome
}

/// Status as it should be read on `as_of`: verified documents past their
/// expiry date read as `Expired`. Other statuses are returned unchanged.
pub fn effective_status(doc: &Document, as_of: NaiveDate) -> DocumentStatus {
    match (doc.status, doc.expiry_date) {
        (DocumentStatus::Verified, Some(expiry)) if expiry < as_of => DocumentStatus::Expired,
        (status, _) => status,
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

fn record_id(value: &serde_json::Value) -> Option<String> {
    match value.get("id")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn normalize_record(
    value: serde_json::Value,
    options: &IngestOptions,
) -> Result<Document, ReconcileError> {
    let raw: RawDocument = serde_json::from_value(value)?;
    let id = raw.id.into_string();

    let status = DocumentStatus::from_str(&raw.status)?;
    if status == DocumentStatus::Missing {
        return Err(ReconcileError::InvalidRecord {
            id,
            reason: "status Missing is never persisted".into(),
        });
    }

    let version = match raw.version {
        Some(v) if v >= 1 && v <= i64::from(u32::MAX) => v as u32,
        Some(v) => {
            return Err(ReconcileError::InvalidRecord {
                id,
                reason: format!("version must be a positive integer, got {v}"),
            })
        }
        None => {
            return Err(ReconcileError::InvalidRecord {
                id,
                reason: "version is missing".into(),
            })
        }
    };

    let mut doc = Document {
        id: DocumentId::new(id),
        owner_id: raw.owner_id.into_string(),
        owner_type: OwnerType::from_str(&raw.owner_type)?,
        document_type: raw.document_type,
        name: non_blank(raw.name),
        version,
        status,
        is_current_for_case: raw.is_current_for_case,
        is_ad_hoc: raw.is_ad_hoc,
        uploaded_by: attribution(raw.uploaded_by),
        uploaded_date: None,
        verified_by: attribution(raw.verified_by),
        verified_date: None,
        rejection_reason: non_blank(raw.rejection_reason),
        comments: non_blank(raw.comments),
        expiry_date: None,
        mime_type: non_blank(raw.mime_type),
    };
    doc.uploaded_date = lenient_datetime(&doc.id, "uploadedDate", raw.uploaded_date);
    doc.verified_date = lenient_datetime(&doc.id, "verifiedDate", raw.verified_date);
    doc.expiry_date = lenient_datetime(&doc.id, "expiryDate", raw.expiry_date).map(|dt| dt.date());

    if let Some(as_of) = options.as_of {
        doc.status = effective_status(&doc, as_of);
    }
    Ok(doc)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn attribution(raw: Option<RawAttribution>) -> Attribution {
    match raw {
        None => Attribution::Unattributed,
        Some(RawAttribution::Name(name)) => match non_blank(Some(name)) {
            Some(display_name) => Attribution::named(display_name),
            None => Attribution::Unattributed,
        },
        Some(RawAttribution::Record(user)) => {
            let user_id = user.id.or(user.user_id).map(RawId::into_string);
            let display_name = non_blank(user.display_name)
                .or_else(|| non_blank(user.name))
                .or_else(|| non_blank(user.username))
                .or_else(|| non_blank(user.email))
                .or_else(|| user_id.clone());
            match display_name {
                Some(display_name) => Attribution::Attributed {
                    user_id,
                    display_name,
                },
                None => Attribution::Unattributed,
            }
        }
    }
}

/// Parse RFC 3339, naive ISO date-time, or a bare date (midnight).
fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn lenient_datetime(id: &DocumentId, field: &str, raw: Option<String>) -> Option<NaiveDateTime> {
    let raw = non_blank(raw)?;
    let parsed = parse_datetime(&raw);
    if parsed.is_none() {
        tracing::warn!(id = %id, field, value = %raw, "Unparseable date, ignoring");
    }
    parsed
}
