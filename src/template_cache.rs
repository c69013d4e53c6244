//! Explicitly owned requirement-template cache.
//!
//! Templates are loaded from a `TemplateSource` once per role and served from
//! memory until invalidated. The cache is created by the caller at session
//! start and dropped with it; there is no process-wide instance.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::DEFAULT_TEMPLATE_ROLE;
use crate::error::TemplateError;
use crate::models::RequirementTemplate;

/// Where requirement templates come from (REST collaborator, bundled JSON, ...).
pub trait TemplateSource: Send + Sync {
    /// Load the template for an owner role. `None` means role unknown.
    fn load(&self, role: Option<&str>) -> Result<RequirementTemplate, TemplateError>;
}

// ── JsonTemplateSource ─────────────────────────────────────────

/// Templates held as JSON text, keyed by role.
#[derive(Debug, Clone, Default)]
pub struct JsonTemplateSource {
    by_role: HashMap<String, String>,
    fallback: Option<String>,
}

impl JsonTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: impl Into<String>, json: impl Into<String>) -> Self {
        self.by_role.insert(role.into(), json.into());
        self
    }

    /// Template used for unknown roles and for `None`.
    pub fn with_fallback(mut self, json: impl Into<String>) -> Self {
        self.fallback = Some(json.into());
        self
    }
}

impl TemplateSource for JsonTemplateSource {
    fn load(&self, role: Option<&str>) -> Result<RequirementTemplate, TemplateError> {
        let json = role
            .and_then(|r| self.by_role.get(r))
            .or(self.fallback.as_ref())
            .ok_or_else(|| TemplateError::UnknownRole(cache_key(role).to_string()))?;
        Ok(RequirementTemplate::from_json(json)?)
    }
}

// ── TemplateCache ──────────────────────────────────────────────

pub struct TemplateCache<S: TemplateSource> {
    source: S,
    entries: Mutex<HashMap<String, Arc<RequirementTemplate>>>,
}

fn cache_key(role: Option<&str>) -> &str {
    role.unwrap_or(DEFAULT_TEMPLATE_ROLE)
}

impl<S: TemplateSource> TemplateCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cached template for `role`, loading it on first use.
    ///
    /// Failed loads are not cached; the next call asks the source again.
    pub fn get(&self, role: Option<&str>) -> Result<Arc<RequirementTemplate>, TemplateError> {
        let key = cache_key(role);
        match self.entries.lock() {
            Ok(mut entries) => {
                if let Some(template) = entries.get(key) {
                    return Ok(Arc::clone(template));
                }

                tracing::debug!(role = key, "Template cache miss");
                let template = Arc::new(self.load(role)?);
                entries.insert(key.to_string(), Arc::clone(&template));
                Ok(template)
            }
            // Lock poisoned, fall through without cache
            Err(_) => self.load(role).map(Arc::new),
        }
    }

    /// Drop the cached template for one role.
    pub fn invalidate(&self, role: Option<&str>) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.remove(cache_key(role)).is_some() {
                tracing::debug!(role = cache_key(role), "Template cache entry invalidated");
            }
        }
    }

    pub fn invalidate_all(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
            tracing::debug!("Template cache cleared");
        }
    }

    pub fn is_cached(&self, role: Option<&str>) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(cache_key(role)))
            .unwrap_or(false)
    }

    fn load(&self, role: Option<&str>) -> Result<RequirementTemplate, TemplateError> {
        self.source.load(role).inspect_err(|e| {
            tracing::warn!(role = cache_key(role), error = %e, "Requirement template load failed");
        })
    }
}
