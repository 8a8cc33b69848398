//! API key to bearer token exchange.

use tracing::{debug, info};

use crate::config::authenticate_url;
use crate::error::AuthError;
use crate::models::auth::AuthenticateResponse;

/// Token material returned by a successful exchange.
#[derive(Debug, Clone)]
pub struct ExchangedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Trade an API key for a bearer token.
///
/// POST `{base_url}/app/authenticate`
/// Body: `{"apiKey": "..."}`
pub async fn exchange(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
) -> Result<ExchangedToken, AuthError> {
    let url = authenticate_url(base_url);
    info!("Exchanging API key for a bearer token");

    let payload = serde_json::json!({
        "apiKey": api_key,
    });

    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await
        .map_err(|e| AuthError::ExchangeFailed(format!("authenticate request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::ExchangeFailed(format!(
            "authenticate endpoint returned {}: {}",
            status, body
        )));
    }

    let data: AuthenticateResponse = response.json().await.map_err(|e| {
        AuthError::ExchangeFailed(format!("failed to parse authenticate response: {}", e))
    })?;

    let token = match data.token {
        Some(token) if !token.is_empty() => token,
        _ => {
            return Err(AuthError::ExchangeFailed(
                "response does not contain a token; check your API key".into(),
            ))
        }
    };
    let expires_in = data.expires_in.ok_or_else(|| {
        AuthError::ExchangeFailed("response does not contain expiresIn".into())
    })?;

    debug!(expires_in, "Token exchange complete");
    Ok(ExchangedToken { token, expires_in })
}
