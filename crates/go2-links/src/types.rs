//! Typed models for Links API responses.
//!
//! Every field is read under both its camelCase and snake_case key; the
//! first key present wins. Fields with an unexpected JSON type are treated
//! as absent.

use go2gg_client::payload::get_first;
use go2gg_client::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// A short link returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub short_url: Option<String>,
    pub destination_url: Option<String>,
    pub slug: Option<String>,
    pub domain: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub has_password: Option<bool>,
    pub expires_at: Option<String>,
    pub click_count: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// The payload the link was parsed from.
    #[serde(skip)]
    pub raw: Map<String, Value>,
}

impl Link {
    /// Parse a link from an API payload.
    ///
    /// Fails with a data-shape error when the payload is not an object or has
    /// no `id`/`linkId`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let data = value
            .as_object()
            .ok_or_else(|| Error::data_shape("Link payload is not an object."))?;
        Self::from_map(data)
    }

    /// Parse a link from a JSON object.
    pub fn from_map(data: &Map<String, Value>) -> Result<Self> {
        let id = match get_first(data, &["id", "linkId"]) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            Some(Value::Null) | None => {
                return Err(Error::data_shape("Link id is missing from the response."))
            }
            Some(other) => {
                return Err(Error::data_shape(format!(
                    "Link id has an unexpected type: {other}"
                )))
            }
        };

        Ok(Self {
            id,
            short_url: string(data, &["shortUrl", "short_url"]),
            destination_url: string(data, &["destinationUrl", "destination_url"]),
            slug: string(data, &["slug"]),
            domain: string(data, &["domain"]),
            title: string(data, &["title"]),
            description: string(data, &["description"]),
            tags: strings(data, &["tags"]),
            has_password: boolean(data, &["hasPassword", "has_password"]),
            expires_at: string(data, &["expiresAt", "expires_at"]),
            click_count: unsigned(data, &["clickCount", "click_count"]),
            created_at: string(data, &["createdAt", "created_at"]),
            updated_at: string(data, &["updatedAt", "updated_at"]),
            raw: data.clone(),
        })
    }
}

/// Pagination metadata for link listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkListMeta {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub total: Option<u64>,
    pub has_more: Option<bool>,
}

impl LinkListMeta {
    pub fn from_map(data: &Map<String, Value>) -> Self {
        Self {
            page: unsigned(data, &["page"]),
            per_page: unsigned(data, &["perPage", "per_page"]),
            total: unsigned(data, &["total"]),
            has_more: boolean(data, &["hasMore", "has_more"]),
        }
    }
}

/// A page of links and optional pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkPage {
    pub data: Vec<Link>,
    pub meta: Option<LinkListMeta>,
}

/// Aggregated click counts by country code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountByCountry {
    pub country: String,
    pub count: u64,
}

/// Aggregated click counts by device type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountByDevice {
    pub device: String,
    pub count: u64,
}

/// Aggregated click counts by browser name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountByBrowser {
    pub browser: String,
    pub count: u64,
}

/// Aggregated click counts by referrer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountByReferrer {
    pub referrer: String,
    pub count: u64,
}

/// Aggregated click counts by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountByDate {
    pub date: String,
    pub count: u64,
}

/// Analytics data for a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub total_clicks: Option<u64>,
    pub last_clicked_at: Option<String>,
    pub by_country: Option<Vec<CountByCountry>>,
    pub by_device: Option<Vec<CountByDevice>>,
    pub by_browser: Option<Vec<CountByBrowser>>,
    pub by_referrer: Option<Vec<CountByReferrer>>,
    pub over_time: Option<Vec<CountByDate>>,
}

impl LinkStats {
    /// Parse analytics from an API payload.
    ///
    /// Breakdown entries missing either their label or their count are skipped.
    pub fn from_map(data: &Map<String, Value>) -> Self {
        Self {
            total_clicks: unsigned(data, &["totalClicks", "total_clicks"]),
            last_clicked_at: string(data, &["lastClickedAt", "last_clicked_at"]),
            by_country: counts(data, &["byCountry", "by_country"], "country", |country, count| {
                CountByCountry { country, count }
            }),
            by_device: counts(data, &["byDevice", "by_device"], "device", |device, count| {
                CountByDevice { device, count }
            }),
            by_browser: counts(data, &["byBrowser", "by_browser"], "browser", |browser, count| {
                CountByBrowser { browser, count }
            }),
            by_referrer: counts(
                data,
                &["byReferrer", "by_referrer"],
                "referrer",
                |referrer, count| CountByReferrer { referrer, count },
            ),
            over_time: counts(data, &["overTime", "over_time"], "date", |date, count| {
                CountByDate { date, count }
            }),
        }
    }
}

fn string(data: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    get_first(data, keys)?.as_str().map(str::to_string)
}

fn unsigned(data: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    get_first(data, keys)?.as_u64()
}

fn boolean(data: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    get_first(data, keys)?.as_bool()
}

fn strings(data: &Map<String, Value>, keys: &[&str]) -> Option<Vec<String>> {
    let items = get_first(data, keys)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}

fn counts<T>(
    data: &Map<String, Value>,
    keys: &[&str],
    label: &str,
    make: impl Fn(String, u64) -> T,
) -> Option<Vec<T>> {
    let items = get_first(data, keys)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|item| {
                let name = item.get(label)?.as_str()?;
                let count = item.get("count")?.as_u64()?;
                Some(make(name.to_string(), count))
            })
            .collect(),
    )
}
