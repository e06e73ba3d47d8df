//! HTTP client for the agenda REST backend.
//!
//! Every authenticated call takes the token from the caller; the client
//! itself holds no session state.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::agenda_config::AgendaConfig;
use crate::error::{AgendaError, AgendaResult};

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> AgendaResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(ApiClient { http, base_url })
    }

    pub fn from_config(config: &AgendaConfig) -> AgendaResult<Self> {
        Self::new(config.api_url()?, config.request_timeout()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an absolute API path (with optional query) against the base
    /// URL, keeping any path prefix the base URL has.
    fn url(&self, path: &str) -> AgendaResult<Url> {
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined)
            .map_err(|e| AgendaError::Config(format!("Invalid URL '{joined}': {e}")))
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> AgendaResult<RequestBuilder> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "api request");

        let builder = self.http.request(method, url);
        Ok(match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> AgendaResult<T> {
        let resp = self.request(Method::GET, path, Some(token))?.send().await?;
        read_json(resp).await
    }

    /// POST a JSON body and decode the response.
    pub async fn post<B, T>(&self, path: &str, body: &B, token: &str) -> AgendaResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .request(Method::POST, path, Some(token))?
            .json(body)
            .send()
            .await?;
        read_json(resp).await
    }

    /// PUT a JSON body and decode the response.
    pub async fn put<B, T>(&self, path: &str, body: &B, token: &str) -> AgendaResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .request(Method::PUT, path, Some(token))?
            .json(body)
            .send()
            .await?;
        read_json(resp).await
    }

    /// POST without credentials (login, registration).
    pub async fn post_anonymous<B, T>(&self, path: &str, body: &B) -> AgendaResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.request(Method::POST, path, None)?.json(body).send().await?;
        read_json(resp).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> AgendaResult<T> {
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(AgendaError::Http {
            status: status.as_u16(),
            detail: error_detail(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
        });
    }

    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| AgendaError::Serialization(e.to_string()))
}

/// Pull a human-readable message out of an error body.
///
/// The backend answers `{"detail": "..."}`, or a list of validation
/// problems under `detail` for rejected payloads.
fn error_detail(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return Some(body.trim().to_string());
    };

    match value.get("detail") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .map(|item| {
                    item.get("msg")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string())
                })
                .collect();
            Some(messages.join("; "))
        }
        Some(other) => Some(other.to_string()),
        None => Some(value.to_string()),
    }
}
