//! HTTP client wrapper

use crate::error::{Error, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// JSON-over-HTTP transport bound to one base URL
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a transport for a base URL with the given timeout and user
    /// agent
    pub fn new(base_url: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Send a GET request for a pre-built path+query string and decode the
    /// JSON response
    ///
    /// The path+query is joined to the base URL verbatim: signed requests
    /// depend on the exact byte sequence of the query string, so nothing
    /// here re-encodes or reorders parameters.
    pub async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let url = self.build_url(path_and_query);
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await.map_err(Error::Http)?;
        let response = check_status(response).await?;
        response.json().await.map_err(Error::Http)
    }

    /// Send a POST request with a JSON body and per-request headers, and
    /// decode the JSON response
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> Result<T> {
        let url = self.build_url(path_and_query);
        debug!(%url, "POST");

        // Apply the caller-provided headers (which include Content-Type)
        // before serializing the JSON body: reqwest's `.json()` only sets
        // Content-Type when absent, so this avoids sending it twice.
        let mut req = self.client.post(&url);
        for (key, value) in headers {
            req = req.header(*key, value);
        }
        let req = req.json(body);

        let response = req.send().await.map_err(Error::Http)?;
        let response = check_status(response).await?;
        response.json().await.map_err(Error::Http)
    }

    /// Join a path+query onto the base URL
    fn build_url(&self, path_and_query: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path_and_query.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Map non-2xx responses onto typed errors, keeping the upstream body as
/// the message
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = status.as_u16();
    let body = response.text().await.unwrap_or_default();
    debug!(status = code, "request rejected");
    Err(Error::from_status(code, body))
}
