//! # go2gg
//!
//! A client library for the go2.gg link-shortening API.
//!
//! This library provides typed access to the go2.gg API with built-in
//! authentication, retry with backoff, and error normalization.
//!
//! ## Security
//!
//! - The API key is redacted in Debug output
//! - Tracing spans skip request bodies and credentials
//!
//! ## Crates
//!
//! - **go2gg-client** - Core HTTP client: authentication, retry, backoff, response decoding
//! - **go2gg-links** - Links API: create, list, get, update, archive, analytics
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use go2gg::links::{CreateLink, LinksClient, ListLinks};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), go2gg::client::Error> {
//!     // Reads GO2GG_API_KEY
//!     let links = LinksClient::from_env()?;
//!
//!     let link = links
//!         .create(CreateLink::new("https://example.com/landing").with_slug("summer-sale"))
//!         .await?;
//!     println!("{}", link.short_url.unwrap_or_default());
//!
//!     for link in links.list(ListLinks::new().with_per_page(10)).await?.data {
//!         println!("{} -> {:?}", link.id, link.destination_url);
//!     }
//!
//!     links.close();
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "client")]
pub use go2gg_client as client;
#[cfg(feature = "links")]
pub use go2gg_links as links;
