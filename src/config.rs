/// Application-level constants
pub const APP_NAME: &str = "kyc-dossier";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix of client-side placeholder identifiers (`new-adhoc-<millis>`).
/// Persisted identifiers never carry it.
pub const PLACEHOLDER_ID_PREFIX: &str = "new-adhoc-";

/// Cache key used when the owner's role classification is unknown.
pub const DEFAULT_TEMPLATE_ROLE: &str = "default";

/// Log filter applied when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "kyc_dossier=info"
}
