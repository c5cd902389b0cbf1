//! Error types for go2gg-client.

use serde_json::{Map, Value};

/// Result type alias for go2gg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for go2gg operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Create a data-shape error.
    pub fn data_shape(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataShape(message.into()))
    }

    /// Returns true if the API rejected the request.
    pub fn is_api_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Api(_))
    }

    /// Returns true if no HTTP response could be obtained.
    pub fn is_request_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Request(_))
    }

    /// Returns true if this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Config(_))
    }

    /// Returns true if a response did not have the expected shape.
    pub fn is_data_shape_error(&self) -> bool {
        matches!(self.kind, ErrorKind::DataShape(_))
    }

    /// Returns the API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match &self.kind {
            ErrorKind::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the HTTP status code of an API error.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|err| err.status)
    }

    /// Returns the machine-readable code of an API error.
    pub fn code(&self) -> Option<&str> {
        self.api_error().and_then(|err| err.code.as_deref())
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The API rejected or failed the request.
    #[error("{0}")]
    Api(ApiError),

    /// Transport failure: connection refused, DNS failure, timeout.
    #[error("Request error: {0}")]
    Request(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A successful response did not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    DataShape(String),

    /// The request itself is malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The client's connection pool has already been released.
    #[error("Client is closed")]
    Closed,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::new(ErrorKind::Api(err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let description = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        Error::with_source(ErrorKind::Request(description), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}

/// Error returned by the go2.gg API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable error code, e.g. `SLUG_EXISTS`.
    pub code: Option<String>,
    /// Structured details, when the API sent an object.
    pub details: Option<Map<String, Value>>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "HTTP {} ({}): {}", self.status, code, self.message),
            None => write!(f, "HTTP {}: {}", self.status, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Normalize an error payload into an `ApiError`.
    ///
    /// The message is taken from `message`, then `error.message`, then
    /// `error_description`, falling back to `"Request failed"`. The code is
    /// taken from `code`, then `errorCode`, then `error.code`. Empty values are
    /// skipped. A non-object payload becomes the message verbatim, except an
    /// empty body which keeps the fallback message.
    pub fn from_payload(status: u16, payload: &Value) -> Self {
        let Value::Object(map) = payload else {
            let message = match payload {
                Value::Null => "Request failed".to_string(),
                other => stringify(other),
            };
            return Self {
                status,
                message,
                code: None,
                details: None,
            };
        };

        let nested = map.get("error").and_then(Value::as_object);
        let nested_field = |key: &str| nested.and_then(|error| error.get(key));

        let message = [
            map.get("message"),
            nested_field("message"),
            map.get("error_description"),
        ]
        .into_iter()
        .flatten()
        .find(|value| is_truthy(value))
        .map(stringify)
        .unwrap_or_else(|| "Request failed".to_string());

        let code = [map.get("code"), map.get("errorCode"), nested_field("code")]
            .into_iter()
            .flatten()
            .find(|value| is_truthy(value))
            .map(stringify);

        let details = map.get("details").and_then(Value::as_object).cloned();

        Self {
            status,
            message,
            code,
            details,
        }
    }
}

/// Empty strings, zero, `false`, `null` and empty containers count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
