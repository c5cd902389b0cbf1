//! go2.gg Links API client.
//!
//! Wraps [`Go2Client`] from `go2gg-client` and provides typed methods for
//! creating, listing, reading, updating, archiving, and inspecting links.

use go2gg_client::{ClientConfig, Error, ErrorKind, Go2Client, Result};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::params::{CreateLink, ListLinks, UpdateLink};
use crate::types::{Link, LinkListMeta, LinkPage, LinkStats};

/// go2.gg Links API client.
///
/// # Example
///
/// ```rust,ignore
/// use go2gg_links::{CreateLink, LinksClient, ListLinks, LinkSort};
///
/// let links = LinksClient::from_env()?;
///
/// let link = links
///     .create(CreateLink::new("https://example.com/landing").with_slug("summer-sale"))
///     .await?;
///
/// let page = links
///     .list(ListLinks::new().with_per_page(10).with_sort(LinkSort::Clicks))
///     .await?;
///
/// links.delete(&link.id).await?;
/// links.close();
/// ```
#[derive(Debug, Clone)]
pub struct LinksClient {
    client: Go2Client,
}

impl LinksClient {
    /// Create a new Links client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Go2Client::new(api_key)?,
        })
    }

    /// Create a new Links client reading the API key from `GO2GG_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client: Go2Client::from_env()?,
        })
    }

    /// Create a new Links client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Go2Client::with_config(config)?,
        })
    }

    /// Create a Links client from an existing Go2Client.
    pub fn from_client(client: Go2Client) -> Self {
        Self { client }
    }

    /// Get the underlying Go2Client.
    pub fn inner(&self) -> &Go2Client {
        &self.client
    }

    /// Release the connection pool if the underlying client owns it.
    pub fn close(&self) {
        self.client.close();
    }

    /// Create a new short link.
    #[instrument(skip(self, params), fields(destination_url = %params.destination_url))]
    pub async fn create(&self, params: CreateLink) -> Result<Link> {
        let response = self.client.post("links", params.to_body()?).await?;
        Link::from_value(&unwrap_data(response))
    }

    /// List links, one page at a time.
    #[instrument(skip(self))]
    pub async fn list(&self, params: ListLinks) -> Result<LinkPage> {
        let mut response = self
            .client
            .get_with_query("links", &params.to_query()?)
            .await?;

        let data = match response.remove("data") {
            Some(Value::Array(items)) => items
                .iter()
                .map(Link::from_value)
                .collect::<Result<Vec<_>>>()?,
            _ => Vec::new(),
        };
        let meta = match response.get("meta") {
            Some(Value::Object(meta)) => Some(LinkListMeta::from_map(meta)),
            _ => None,
        };

        Ok(LinkPage { data, meta })
    }

    /// Get a link by id.
    #[instrument(skip(self))]
    pub async fn get(&self, link_id: &str) -> Result<Link> {
        let response = self.client.get(&link_path(link_id)?).await?;
        Link::from_value(&unwrap_data(response))
    }

    /// Update a link. Only fields set on `params` are changed.
    #[instrument(skip(self, params))]
    pub async fn update(&self, link_id: &str, params: UpdateLink) -> Result<Link> {
        let path = link_path(link_id)?;
        let response = self.client.patch(&path, params.to_body()?).await?;
        Link::from_value(&unwrap_data(response))
    }

    /// Archive a link.
    #[instrument(skip(self))]
    pub async fn delete(&self, link_id: &str) -> Result<()> {
        self.client.delete(&link_path(link_id)?).await?;
        Ok(())
    }

    /// Get click analytics for a link.
    ///
    /// A response without an analytics object yields [`LinkStats::default`].
    #[instrument(skip(self))]
    pub async fn stats(&self, link_id: &str) -> Result<LinkStats> {
        let path = format!("{}/stats", link_path(link_id)?);
        let response = self.client.get(&path).await?;
        Ok(match unwrap_data(response) {
            Value::Object(data) => LinkStats::from_map(&data),
            _ => LinkStats::default(),
        })
    }
}

fn link_path(link_id: &str) -> Result<String> {
    if link_id.is_empty() {
        return Err(Error::new(ErrorKind::InvalidRequest(
            "link id must not be empty".to_string(),
        )));
    }
    Ok(format!("links/{}", urlencoding::encode(link_id)))
}

/// Prefer the `data` envelope; fall back to the whole response.
fn unwrap_data(mut response: Map<String, Value>) -> Value {
    response
        .remove("data")
        .unwrap_or(Value::Object(response))
}
