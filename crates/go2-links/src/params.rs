//! Parameters for Links API operations.
//!
//! Fields are snake_case in Rust and sent camelCase on the wire. Unset fields
//! are omitted from the request entirely.

use std::collections::BTreeMap;

use go2gg_client::payload::to_wire;
use go2gg_client::Result;
use serde::Serialize;
use serde_json::{Map, Value};

/// Body for `POST /links`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateLink {
    pub destination_url: String,
    pub slug: Option<String>,
    pub domain: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub password: Option<String>,
    pub expires_at: Option<String>,
    pub click_limit: Option<u64>,
    /// Country code to redirect URL.
    pub geo_targets: Option<BTreeMap<String, String>>,
    /// Device type to redirect URL.
    pub device_targets: Option<BTreeMap<String, String>>,
    pub ios_url: Option<String>,
    pub android_url: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
}

impl CreateLink {
    pub fn new(destination_url: impl Into<String>) -> Self {
        Self {
            destination_url: destination_url.into(),
            ..Self::default()
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Expiry as an ISO 8601 timestamp.
    pub fn with_expires_at(mut self, expires_at: impl Into<String>) -> Self {
        self.expires_at = Some(expires_at.into());
        self
    }

    pub fn with_click_limit(mut self, click_limit: u64) -> Self {
        self.click_limit = Some(click_limit);
        self
    }

    pub fn with_geo_target(mut self, country: impl Into<String>, url: impl Into<String>) -> Self {
        self.geo_targets
            .get_or_insert_with(BTreeMap::new)
            .insert(country.into(), url.into());
        self
    }

    pub fn with_device_target(mut self, device: impl Into<String>, url: impl Into<String>) -> Self {
        self.device_targets
            .get_or_insert_with(BTreeMap::new)
            .insert(device.into(), url.into());
        self
    }

    pub fn with_ios_url(mut self, url: impl Into<String>) -> Self {
        self.ios_url = Some(url.into());
        self
    }

    pub fn with_android_url(mut self, url: impl Into<String>) -> Self {
        self.android_url = Some(url.into());
        self
    }

    /// Set the UTM source, medium, and campaign together.
    pub fn with_utm(
        mut self,
        source: impl Into<String>,
        medium: impl Into<String>,
        campaign: impl Into<String>,
    ) -> Self {
        self.utm_source = Some(source.into());
        self.utm_medium = Some(medium.into());
        self.utm_campaign = Some(campaign.into());
        self
    }

    pub fn with_utm_term(mut self, term: impl Into<String>) -> Self {
        self.utm_term = Some(term.into());
        self
    }

    pub fn with_utm_content(mut self, content: impl Into<String>) -> Self {
        self.utm_content = Some(content.into());
        self
    }

    /// Wire body with camelCase keys.
    pub fn to_body(&self) -> Result<Map<String, Value>> {
        to_wire(self)
    }
}

/// Body for `PATCH /links/{id}`. Only set fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateLink {
    pub destination_url: Option<String>,
    pub slug: Option<String>,
    pub domain: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub password: Option<String>,
    pub expires_at: Option<String>,
    pub click_limit: Option<u64>,
    pub geo_targets: Option<BTreeMap<String, String>>,
    pub device_targets: Option<BTreeMap<String, String>>,
    pub ios_url: Option<String>,
    pub android_url: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    /// Archive (`true`) or restore (`false`) the link.
    pub is_archived: Option<bool>,
}

impl UpdateLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_destination_url(mut self, url: impl Into<String>) -> Self {
        self.destination_url = Some(url.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_expires_at(mut self, expires_at: impl Into<String>) -> Self {
        self.expires_at = Some(expires_at.into());
        self
    }

    pub fn with_click_limit(mut self, click_limit: u64) -> Self {
        self.click_limit = Some(click_limit);
        self
    }

    pub fn with_geo_target(mut self, country: impl Into<String>, url: impl Into<String>) -> Self {
        self.geo_targets
            .get_or_insert_with(BTreeMap::new)
            .insert(country.into(), url.into());
        self
    }

    pub fn with_device_target(mut self, device: impl Into<String>, url: impl Into<String>) -> Self {
        self.device_targets
            .get_or_insert_with(BTreeMap::new)
            .insert(device.into(), url.into());
        self
    }

    pub fn with_ios_url(mut self, url: impl Into<String>) -> Self {
        self.ios_url = Some(url.into());
        self
    }

    pub fn with_android_url(mut self, url: impl Into<String>) -> Self {
        self.android_url = Some(url.into());
        self
    }

    pub fn with_utm_source(mut self, source: impl Into<String>) -> Self {
        self.utm_source = Some(source.into());
        self
    }

    pub fn with_utm_medium(mut self, medium: impl Into<String>) -> Self {
        self.utm_medium = Some(medium.into());
        self
    }

    pub fn with_utm_campaign(mut self, campaign: impl Into<String>) -> Self {
        self.utm_campaign = Some(campaign.into());
        self
    }

    pub fn with_utm_term(mut self, term: impl Into<String>) -> Self {
        self.utm_term = Some(term.into());
        self
    }

    pub fn with_utm_content(mut self, content: impl Into<String>) -> Self {
        self.utm_content = Some(content.into());
        self
    }

    pub fn with_archived(mut self, archived: bool) -> Self {
        self.is_archived = Some(archived);
        self
    }

    pub fn to_body(&self) -> Result<Map<String, Value>> {
        to_wire(self)
    }
}

/// Sort order for link listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkSort {
    Created,
    Clicks,
    Updated,
}

/// Query for `GET /links`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListLinks {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub domain: Option<String>,
    pub tag: Option<String>,
    /// Include archived links.
    pub archived: Option<bool>,
    pub sort: Option<LinkSort>,
}

impl ListLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    pub fn with_sort(mut self, sort: LinkSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Query parameters with camelCase names.
    pub fn to_query(&self) -> Result<Map<String, Value>> {
        to_wire(self)
    }
}
