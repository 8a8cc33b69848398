//! Authentication-related types.

use serde::{Deserialize, Serialize};

/// A bearer token and its recorded expiry.
///
/// Written only by the auth manager after a successful exchange; read at the
/// start of every fetch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Bearer token issued by the authenticate endpoint.
    pub token: String,
    /// Unix timestamp the token expires at (issue time + `expiresIn`).
    pub expires_at: i64,
}

impl TokenInfo {
    /// Create a credential with an explicit expiry timestamp.
    pub fn new(token: String, expires_at: i64) -> Self {
        Self { token, expires_at }
    }

    /// Create a credential from an exchange response, anchoring the expiry
    /// at the current time plus `expires_in` seconds.
    pub fn from_exchange(token: String, expires_in: i64) -> Self {
        Self {
            token,
            expires_at: chrono::Utc::now().timestamp() + expires_in,
        }
    }

    /// Whether the cached token can still be used without a new exchange.
    ///
    /// A token counts as fresh while less than
    /// [`TOKEN_FRESHNESS_WINDOW`](crate::config::TOKEN_FRESHNESS_WINDOW) has
    /// passed since `expires_at`, so it remains usable up to 48 hours past
    /// its nominal expiry. An empty token is never fresh.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        if self.token.is_empty() {
            return false;
        }
        let now = chrono::Utc::now().timestamp();
        let window = crate::config::TOKEN_FRESHNESS_WINDOW.as_secs() as i64;
        now - self.expires_at < window
    }
}

/// Response envelope from the authenticate endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}
