//! High-level go2.gg client: credentials, connection pool lifecycle, and
//! typed JSON methods.
//!
//! ## Security
//!
//! - The API key is redacted in Debug output
//! - Request bodies are skipped in tracing spans

use std::sync::{Arc, PoisonError, RwLock};

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::client::Go2HttpClient;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::Request;

/// High-level go2.gg API client.
///
/// Cloning is cheap and every clone shares the same connection pool. The pool
/// is acquired at construction, or borrowed from the caller via
/// [`Go2Client::with_http_client`]. An owned pool is released by
/// [`Go2Client::close`] (idempotent) or when the last clone is dropped; a
/// borrowed pool is never torn down by this client.
///
/// # Example
///
/// ```rust,ignore
/// use go2gg_client::{Go2Client, Request};
///
/// let client = Go2Client::from_env()?;
/// let payload = client.get("/links/lnk_abc123").await?;
/// client.close();
/// ```
#[derive(Clone)]
pub struct Go2Client {
    shared: Arc<Shared>,
}

struct Shared {
    http: RwLock<Option<Arc<Go2HttpClient>>>,
    base_url: String,
    owns_pool: bool,
}

impl std::fmt::Debug for Go2Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Go2Client")
            .field("base_url", &self.shared.base_url)
            .field("api_key", &"[REDACTED]")
            .field("owns_pool", &self.shared.owns_pool)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl Go2Client {
    /// Create a new client with the given API key and default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::builder().with_api_key(api_key).build())
    }

    /// Create a new client reading the API key from `GO2GG_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration and its own connection pool.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = Go2HttpClient::new(&config)?;
        Ok(Self::from_parts(http, true))
    }

    /// Create a new client on a connection pool owned by the caller.
    ///
    /// [`Go2Client::close`] leaves a borrowed pool untouched.
    pub fn with_http_client(config: ClientConfig, http_client: reqwest::Client) -> Result<Self> {
        let http = Go2HttpClient::with_reqwest(&config, http_client)?;
        Ok(Self::from_parts(http, false))
    }

    fn from_parts(http: Go2HttpClient, owns_pool: bool) -> Self {
        Self {
            shared: Arc::new(Shared {
                base_url: http.base_url().to_string(),
                http: RwLock::new(Some(Arc::new(http))),
                owns_pool,
            }),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.shared.base_url
    }

    /// Whether this client created its connection pool.
    pub fn owns_pool(&self) -> bool {
        self.shared.owns_pool
    }

    /// Whether the owned connection pool has been released.
    pub fn is_closed(&self) -> bool {
        self.shared
            .http
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Release the connection pool if this client owns it.
    ///
    /// Calling this more than once is a no-op. Requests already in flight
    /// finish on the pool; new requests fail with [`ErrorKind::Closed`].
    pub fn close(&self) {
        if !self.shared.owns_pool {
            return;
        }

        let released = self
            .shared
            .http
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if released.is_some() {
            debug!(base_url = %self.shared.base_url, "Released connection pool");
        }
    }

    fn http(&self) -> Result<Arc<Go2HttpClient>> {
        self.shared
            .http
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| Error::new(ErrorKind::Closed))
    }

    /// Execute a request and return the decoded JSON object.
    pub async fn execute(&self, request: Request) -> Result<Map<String, Value>> {
        let http = self.http()?;
        http.execute(&request).await
    }

    /// GET request.
    #[instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Map<String, Value>> {
        self.execute(Request::get(path)).await
    }

    /// GET request with query parameters.
    #[instrument(skip(self, params))]
    pub async fn get_with_query(
        &self,
        path: &str,
        params: &Map<String, Value>,
    ) -> Result<Map<String, Value>> {
        self.execute(Request::get(path).query_map(params)).await
    }

    /// POST request with JSON body.
    #[instrument(skip(self, body))]
    pub async fn post(&self, path: &str, body: Map<String, Value>) -> Result<Map<String, Value>> {
        self.execute(Request::post(path).json_value(Value::Object(body)))
            .await
    }

    /// PATCH request with JSON body.
    #[instrument(skip(self, body))]
    pub async fn patch(&self, path: &str, body: Map<String, Value>) -> Result<Map<String, Value>> {
        self.execute(Request::patch(path).json_value(Value::Object(body)))
            .await
    }

    /// DELETE request.
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Map<String, Value>> {
        self.execute(Request::delete(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryConfig;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ClientConfig {
        ClientConfig::builder()
            .with_api_key("test-key")
            .with_base_url(format!("{}/api/v1", server.uri()))
            .build()
    }

    async fn ok_server() -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/links"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[test]
    fn test_missing_api_key_and_env_fallback() {
        // Both cases live in one test: they share the process environment.
        std::env::remove_var(crate::API_KEY_ENV);
        let err = Go2Client::from_env().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("GO2GG_API_KEY"));

        let err = Go2Client::new("").unwrap_err();
        assert!(err.is_config_error());

        std::env::set_var(crate::API_KEY_ENV, "env-key");
        let client = Go2Client::from_env();
        let fallback = Go2Client::new("");
        std::env::remove_var(crate::API_KEY_ENV);

        assert!(client.is_ok());
        assert!(fallback.is_ok());
    }

    #[test]
    fn test_trailing_slash_handling() {
        let client = Go2Client::with_config(
            ClientConfig::builder()
                .with_api_key("k")
                .with_base_url("https://api.go2.gg/api/v1/")
                .build(),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://api.go2.gg/api/v1");
    }

    #[test]
    fn test_default_base_url() {
        let client = Go2Client::new("k").unwrap();
        assert_eq!(client.base_url(), "https://api.go2.gg/api/v1");
        assert!(client.owns_pool());
        assert!(!client.is_closed());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = Go2Client::new("super-secret").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_rejects_new_requests() {
        let mock_server = ok_server().await;
        let client = Go2Client::with_config(config_for(&mock_server)).unwrap();

        client.get("links").await.unwrap();

        client.close();
        assert!(client.is_closed());
        client.close();
        assert!(client.is_closed());

        let err = client.get("links").await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Closed));
    }

    #[tokio::test]
    async fn test_close_is_shared_between_clones() {
        let mock_server = ok_server().await;
        let client = Go2Client::with_config(config_for(&mock_server)).unwrap();
        let clone = client.clone();

        client.close();
        assert!(clone.is_closed());
        assert!(clone.get("links").await.is_err());
    }

    #[tokio::test]
    async fn test_borrowed_pool_survives_close() {
        let mock_server = ok_server().await;
        let pool = reqwest::Client::new();

        let client = Go2Client::with_http_client(config_for(&mock_server), pool.clone()).unwrap();
        assert!(!client.owns_pool());

        client.close();
        assert!(!client.is_closed());
        client.get("links").await.unwrap();

        // The caller's pool is still usable on its own.
        let response = pool
            .get(format!("{}/api/v1/links", mock_server.uri()))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn test_concurrent_requests() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/links/lnk_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "lnk_1"}})))
            .expect(10)
            .mount(&mock_server)
            .await;

        let client = Go2Client::with_config(config_for(&mock_server)).unwrap();
        let calls = (0..10).map(|_| client.get("/links/lnk_1"));
        let results = futures::future::join_all(calls).await;

        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[tokio::test]
    async fn test_abandoned_call_leaves_pool_usable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/links"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&mock_server)
            .await;

        let client = Go2Client::with_config(
            ClientConfig::builder()
                .with_api_key("test-key")
                .with_base_url(format!("{}/api/v1", mock_server.uri()))
                .with_retry(RetryConfig::default().with_max_retries(2))
                .build(),
        )
        .unwrap();

        let abandoned = tokio::time::timeout(Duration::from_millis(200), client.get("slow")).await;
        assert!(abandoned.is_err());

        let payload = client.get("links").await.unwrap();
        assert_eq!(payload["data"], json!([]));
    }

    #[tokio::test]
    async fn test_in_flight_request_finishes_after_close() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/links"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": []}))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&mock_server)
            .await;

        let client = Go2Client::with_config(config_for(&mock_server)).unwrap();
        let in_flight = client.get("links");
        let closer = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            client.close();
        };

        let (result, ()) = tokio::join!(in_flight, closer);
        assert!(result.is_ok());
        assert!(client.is_closed());
    }
}
