//! HTTP client for the Mira API.
//!
//! Every request waits on the authentication gate, carries the bearer token,
//! and is attempted exactly once. Timeouts come from the client
//! configuration; retry policy belongs to the embedding application.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::MiraAuthManager;
use crate::config::{CONNECT_TIMEOUT, REQUEST_TIMEOUT};
use crate::error::{Error, Result};
use crate::transport::headers;

/// Gate-protected HTTP client for Mira API calls.
pub struct MiraHttpClient {
    client: reqwest::Client,
    auth: std::sync::Arc<MiraAuthManager>,
}

impl MiraHttpClient {
    /// Create a new HTTP client.
    pub fn new(auth: std::sync::Arc<MiraAuthManager>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, auth }
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: reqwest::Client, auth: std::sync::Arc<MiraAuthManager>) -> Self {
        Self { client, auth }
    }

    /// Send a GET request and deserialize the JSON response.
    ///
    /// Dropping the returned future cancels the request; an in-flight
    /// authentication is unaffected by that.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let token = self.auth.access_token().await?;
        let hdrs = headers::api_headers(&token);

        debug!(url, "Sending GET request");

        let mut request = self.client.get(url).headers(hdrs);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        response.json::<T>().await.map_err(classify)
    }
}

fn classify(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Transport(e)
    }
}

impl std::fmt::Debug for MiraHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiraHttpClient")
            .field("auth", &self.auth)
            .finish()
    }
}
