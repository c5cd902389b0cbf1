//! Request execution engine: authenticated HTTP calls with retry and outcome
//! classification.

use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::Request;
use crate::response::{classify, Outcome};
use crate::retry::{RetryConfig, RetryPolicy};

/// HTTP client for the go2.gg API with built-in retry and error normalization.
///
/// Every call runs its own attempt loop; the only state shared between
/// concurrent calls is the underlying connection pool.
#[derive(Clone)]
pub struct Go2HttpClient {
    inner: reqwest::Client,
    base_url: String,
    api_key: String,
    user_agent: Option<String>,
    retry: RetryConfig,
    enable_tracing: bool,
}

impl std::fmt::Debug for Go2HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Go2HttpClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl Go2HttpClient {
    /// Create a new HTTP client with its own connection pool.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeouts.total)
            .connect_timeout(config.timeouts.connect)
            .read_timeout(config.timeouts.read)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Self::with_reqwest(config, inner)
    }

    /// Create a new HTTP client on top of an existing connection pool.
    ///
    /// Timeout and pool settings in `config` are ignored; the pool is used as
    /// it was built.
    pub fn with_reqwest(config: &ClientConfig, inner: reqwest::Client) -> Result<Self> {
        Ok(Self {
            inner,
            base_url: resolve_base_url(&config.base_url)?,
            api_key: resolve_api_key(config.api_key.as_deref())?,
            user_agent: config.user_agent.clone(),
            retry: config.retry.clone(),
            enable_tracing: config.enable_tracing,
        })
    }

    /// The base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The retry configuration.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Build the full URL for a path, including query parameters.
    ///
    /// The path is joined to the base URL with exactly one slash.
    pub fn url(&self, request: &Request) -> Result<Url> {
        let path = request.path().trim_start_matches('/');
        if path.is_empty() {
            return Err(Error::new(ErrorKind::InvalidRequest(
                "request path must not be empty".to_string(),
            )));
        }

        let mut url = Url::parse(&format!("{}/{}", self.base_url, path)).map_err(|e| {
            Error::with_source(ErrorKind::InvalidRequest(format!("invalid path {path:?}: {e}")), e)
        })?;

        if !request.query_params().is_empty() {
            url.query_pairs_mut().extend_pairs(request.query_params());
        }
        Ok(url)
    }

    /// Execute a request with automatic retry handling.
    ///
    /// Returns the decoded JSON object on success. Fails with an API error when
    /// the service rejects the request and with a request error when no
    /// response could be obtained; retries happen only while the budget lasts,
    /// and the last attempt's error is the one returned.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn execute(&self, request: &Request) -> Result<Map<String, Value>> {
        let url = self.url(request)?;
        let mut retry_policy = RetryPolicy::new(&self.retry);

        loop {
            match self.execute_once(request, &url).await {
                Ok(Outcome::Success(payload)) => return Ok(payload),
                Ok(Outcome::Rejected(err)) => return Err(err.into()),
                Ok(Outcome::Failure(err)) => {
                    if let Some(delay) = retry_policy.next_delay(Some(err.status)) {
                        warn!(
                            attempt = retry_policy.attempt(),
                            delay_ms = delay.as_millis(),
                            status = err.status,
                            error = %err,
                            "Request failed, retrying"
                        );
                        sleep_before_retry(delay).await;
                        continue;
                    }
                    return Err(err.into());
                }
                Err(err) => {
                    if let Some(delay) = retry_policy.next_delay(None) {
                        warn!(
                            attempt = retry_policy.attempt(),
                            delay_ms = delay.as_millis(),
                            error = %err,
                            "Request failed, retrying"
                        );
                        sleep_before_retry(delay).await;
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Execute a single request without retry logic.
    ///
    /// `Err` means no response was obtained.
    async fn execute_once(&self, request: &Request, url: &Url) -> Result<Outcome> {
        let mut req = self
            .inner
            .request(request.method().to_reqwest(), url.clone())
            .bearer_auth(&self.api_key);

        if let Some(ref user_agent) = self.user_agent {
            req = req.header(reqwest::header::USER_AGENT, user_agent.as_str());
        }

        if let Some(body) = request.body() {
            req = req.json(body);
        }

        if self.enable_tracing {
            debug!(method = %request.method(), url = %url, "Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        if self.enable_tracing {
            let content_length = response.content_length();
            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        if status == 204 {
            return Ok(classify(status, ""));
        }

        let body = response.text().await?;
        Ok(classify(status, &body))
    }
}

async fn sleep_before_retry(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn resolve_api_key(explicit: Option<&str>) -> Result<String> {
    explicit
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .or_else(|| {
            std::env::var(crate::API_KEY_ENV)
                .ok()
                .filter(|key| !key.is_empty())
        })
        .ok_or_else(|| {
            Error::config(format!(
                "API key is required. Provide one explicitly or set {} in the environment.",
                crate::API_KEY_ENV
            ))
        })
}

fn resolve_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::config("base_url is required"));
    }
    Url::parse(trimmed)?;
    Ok(trimmed.to_string())
}
