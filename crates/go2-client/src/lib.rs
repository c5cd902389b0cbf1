//! # go2gg-client
//!
//! Core HTTP client infrastructure for the go2.gg API.
//!
//! This crate provides the foundational HTTP client with:
//! - Bearer authentication from an explicit key or `GO2GG_API_KEY`
//! - Bounded retry with optional exponential backoff
//! - Tolerant response decoding and error normalization
//! - Connection pooling with owned or borrowed pools
//! - Request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (go2gg-links)                                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Go2Client                             │
//! │  - Owns or borrows the connection pool                      │
//! │  - Provides JSON methods (get, post, patch, delete)         │
//! │  - Idempotent close                                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Go2HttpClient                           │
//! │  - Authenticated HTTP with retry and backoff                │
//! │  - Response classification                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use go2gg_client::{ClientConfig, Go2Client, RetryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), go2gg_client::Error> {
//!     let client = Go2Client::with_config(
//!         ClientConfig::builder()
//!             .with_api_key("go2_live_...")
//!             .with_retry(RetryConfig::default().with_max_retries(3).with_backoff(true))
//!             .build(),
//!     )?;
//!
//!     let link = client.get("/links/lnk_abc123").await?;
//!     println!("{}", link["data"]["shortUrl"]);
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod go2_client;
pub mod payload;
mod request;
mod response;
mod retry;

pub use client::Go2HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, TimeoutConfig};
pub use error::{ApiError, Error, ErrorKind, Result};
pub use go2_client::Go2Client;
pub use request::{Request, RequestMethod};
pub use response::{classify, decode_body, Outcome};
pub use retry::{BackoffStrategy, RetryConfig, RetryPolicy, DEFAULT_RETRY_STATUSES};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.go2.gg/api/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GO2GG_API_KEY";

/// User-Agent string advertised by client-owned connection pools.
pub const USER_AGENT: &str = concat!("go2gg-rust/", env!("CARGO_PKG_VERSION"));
