//! # go2gg-links
//!
//! go2.gg Links API client.
//!
//! This crate provides typed access to short links:
//!
//! - **Create**: new short links with slugs, targeting, and UTM tags
//! - **List**: paginated, filterable listings
//! - **Get / Update / Delete**: single-link operations
//! - **Stats**: click analytics by country, device, browser, referrer, and date
//!
//! ## Example
//!
//! ```rust,ignore
//! use go2gg_links::{CreateLink, LinksClient};
//!
//! let links = LinksClient::new("go2_live_...")?;
//!
//! let link = links
//!     .create(CreateLink::new("https://example.com/landing").with_slug("summer-sale"))
//!     .await?;
//! println!("{}", link.short_url.unwrap_or_default());
//!
//! let stats = links.stats(&link.id).await?;
//! println!("{:?} clicks", stats.total_clicks);
//! ```

mod client;
mod params;
mod types;

pub use client::LinksClient;
pub use params::{CreateLink, LinkSort, ListLinks, UpdateLink};
pub use types::{
    CountByBrowser, CountByCountry, CountByDate, CountByDevice, CountByReferrer, Link,
    LinkListMeta, LinkPage, LinkStats,
};

// Errors are shared with the core client.
pub use go2gg_client::{Error, ErrorKind, Result};
