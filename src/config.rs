//! Configuration constants, endpoint URL builders, and the bundled
//! configuration source.

use std::time::Duration;

/// Default Mira API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.mira.media/v1";

/// Freshness window applied to cached credentials.
///
/// A stored token is reused without a network exchange while less than this
/// much time has passed since its recorded expiry, so a token stays usable up
/// to 48 hours beyond `expires_at`. The server remains authoritative and
/// rejects anything it no longer accepts.
pub const TOKEN_FRESHNESS_WINDOW: Duration = Duration::from_secs(48 * 60 * 60);

/// Configuration key the API key is read from when none is supplied
/// explicitly.
pub const API_KEY_CONFIG_KEY: &str = "MIRA_API_KEY";

/// Connect timeout for HTTP requests.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Total timeout for a single request. Each call is attempted exactly once;
/// retry policy belongs to the embedding application.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Validate that a media ID is safe to splice into a URL path.
///
/// IDs are opaque but always URL-safe; anything else is rejected before a
/// request is built.
fn validate_media_id(id: &str) -> Result<(), crate::error::Error> {
    use std::sync::LazyLock;
    static ID_RE: LazyLock<regex_lite::Regex> =
        LazyLock::new(|| regex_lite::Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());
    if ID_RE.is_match(id) {
        Ok(())
    } else {
        Err(crate::error::Error::Config(format!(
            "invalid media ID: '{}' (expected URL-safe characters)",
            id
        )))
    }
}

/// Returns the authenticate (API key exchange) URL.
pub fn authenticate_url(base_url: &str) -> String {
    format!("{}/app/authenticate", base_url.trim_end_matches('/'))
}

/// Returns the media search URL.
pub fn search_url(base_url: &str) -> String {
    format!("{}/media/search", base_url.trim_end_matches('/'))
}

/// Returns the trending media URL.
pub fn trending_url(base_url: &str) -> String {
    format!("{}/media/trending", base_url.trim_end_matches('/'))
}

/// Returns the single-media lookup URL for the given ID.
pub fn media_by_id_url(base_url: &str, id: &str) -> Result<String, crate::error::Error> {
    validate_media_id(id)?;
    Ok(format!("{}/media/{}", base_url.trim_end_matches('/'), id))
}

/// Read-only source of bundled application configuration (e.g. an API key
/// set at build or deploy time).
pub trait ConfigSource: Send + Sync {
    /// Read a configuration value, `None` when absent.
    fn read(&self, key: &str) -> Option<String>;
}

/// [`ConfigSource`] backed by process environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvConfig;

impl ConfigSource for EnvConfig {
    fn read(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}
