//! HTTP request proxy for the Ridgeline backend.
//!
//! Every backend call in the crate flows through [`ApiClient`], so bearer
//! token injection, timeouts, and error normalization live in exactly one
//! place. Callers never see raw responses, only typed values or [`ApiError`].

mod error;
pub(crate) mod types;

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::token::TokenSlot;

pub use error::ApiError;
use error::ErrorBody;

/// Backend API client.
///
/// Cheap to clone; clones share the HTTP connection pool and the token slot.
#[derive(Clone)]
pub(crate) struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    token: TokenSlot,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed, which only happens
    /// when the TLS backend fails to initialize.
    #[must_use]
    pub(crate) fn new(config: &ClientConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
                token: TokenSlot::new(&config.session_file),
            }),
        }
    }

    /// The token slot this client reads its bearer token from.
    pub(crate) fn token_slot(&self) -> TokenSlot {
        self.inner.token.clone()
    }

    /// GET a JSON resource.
    #[instrument(skip(self))]
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.run(self.request(Method::GET, path).await).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST a JSON body and decode the JSON response.
    #[instrument(skip(self, body))]
    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self
            .run(self.request(Method::POST, path).await.json(body))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// PUT a JSON body and decode the JSON response.
    #[instrument(skip(self, body))]
    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self
            .run(self.request(Method::PUT, path).await.json(body))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// DELETE a resource. The response body, if any, is discarded.
    #[instrument(skip(self))]
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.run(self.request(Method::DELETE, path).await).await?;
        Ok(())
    }

    /// Cheap reachability probe against `/health`.
    ///
    /// Success means the server answered at all; the body is ignored.
    #[instrument(skip(self))]
    pub(crate) async fn probe_health(&self) -> Result<(), ApiError> {
        self.run(self.request(Method::GET, "/health").await)
            .await
            .map(|_| ())
    }

    /// Build a request with the bearer token attached when one is set.
    async fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        let mut builder = self.inner.client.request(method, url);

        if let Some(token) = self.inner.token.get().await {
            builder = builder.bearer_auth(token.expose_secret());
        }

        builder
    }

    /// Send a request and normalize the response to a JSON value.
    ///
    /// A 204, or a success body that is not JSON, yields `Value::Null` so
    /// callers expecting no payload do not fail on empty responses.
    async fn run(&self, builder: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_transport)?;
        Self::handle_response(response).await
    }

    /// Handle a response, normalizing errors.
    async fn handle_response(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        if status.is_success() {
            let body = response.text().await.map_err(ApiError::from_transport)?;
            return Ok(serde_json::from_str(&body).unwrap_or(Value::Null));
        }

        Err(Self::handle_error_status(status, response).await)
    }

    /// Handle an error status code.
    async fn handle_error_status(status: StatusCode, response: reqwest::Response) -> ApiError {
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| status_fallback(status)),
            Err(_) => status_fallback(status),
        };

        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Generic message for error responses whose body carried none.
fn status_fallback(status: StatusCode) -> String {
    format!(
        "Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn test_config() -> ClientConfig {
        ClientConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(1),
            session_file: std::env::temp_dir().join("ridgeline-api-test-session.json"),
        }
    }

    #[test]
    fn test_status_fallback_known_status() {
        assert_eq!(
            status_fallback(StatusCode::NOT_FOUND),
            "Error 404: Not Found"
        );
    }

    #[test]
    fn test_status_fallback_unknown_status() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(status_fallback(status), "Error 599: Unknown");
    }

    #[test]
    fn test_api_client_builds_without_network() {
        let _client = ApiClient::new(&test_config());
    }

    #[test]
    fn test_api_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<ApiClient>();
    }

    #[test]
    fn test_api_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiClient>();
    }
}
