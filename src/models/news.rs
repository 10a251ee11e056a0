//! News record data structures.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::policy::AssignmentPolicy;

/// Publication state of a news item. The API carries the integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PublishStatus {
    Draft,
    Preview,
    Published,
}

impl PublishStatus {
    pub const ALL: [PublishStatus; 3] = [
        PublishStatus::Draft,
        PublishStatus::Preview,
        PublishStatus::Published,
    ];

    pub fn code(&self) -> i64 {
        match self {
            PublishStatus::Draft => 0,
            PublishStatus::Preview => 1,
            PublishStatus::Published => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(PublishStatus::Draft),
            1 => Some(PublishStatus::Preview),
            2 => Some(PublishStatus::Published),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "Borrador",
            PublishStatus::Preview => "Preview",
            PublishStatus::Published => "Publicado",
        }
    }
}

impl TryFrom<i64> for PublishStatus {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown publish status {code}"))
    }
}

impl From<PublishStatus> for i64 {
    fn from(status: PublishStatus) -> Self {
        status.code()
    }
}

/// Status filter for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PublishStatus),
}

impl StatusFilter {
    pub const ALL_CODE: i64 = -1;

    pub fn code(&self) -> i64 {
        match self {
            StatusFilter::All => Self::ALL_CODE,
            StatusFilter::Only(status) => status.code(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "Todas",
            StatusFilter::Only(status) => status.label(),
        }
    }

    /// Parse a filter from a name (`all`, `draft`, ...) or a numeric code.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "-1" => Some(StatusFilter::All),
            "draft" => Some(StatusFilter::Only(PublishStatus::Draft)),
            "preview" => Some(StatusFilter::Only(PublishStatus::Preview)),
            "published" => Some(StatusFilter::Only(PublishStatus::Published)),
            other => other
                .parse::<i64>()
                .ok()
                .and_then(PublishStatus::from_code)
                .map(StatusFilter::Only),
        }
    }
}

/// Full news record as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub id: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    pub publish_status: PublishStatus,

    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_assignment_policy: Option<AssignmentPolicy>,
}

/// Entry of the `read` list attached to listed news.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadEntry {
    #[serde(rename = "actor__code")]
    pub actor_code: String,
}

/// News row as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSummary {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    pub publish_status: i64,
    #[serde(default)]
    pub read: Option<Vec<ReadEntry>>,
}

/// News row prepared for the listing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsListItem {
    pub key: i64,
    pub title: String,
    pub author: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: i64,
    /// Distinct readers
    pub stats: usize,
}

impl From<NewsSummary> for NewsListItem {
    fn from(news: NewsSummary) -> Self {
        let stats = news
            .read
            .as_ref()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| entry.actor_code.as_str())
                    .collect::<HashSet<_>>()
                    .len()
            })
            .unwrap_or(0);

        Self {
            key: news.id,
            title: news.title,
            author: news.author,
            start: news.start,
            end: news.end,
            status: news.publish_status,
            stats,
        }
    }
}

/// Raw listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsListResponse {
    pub count: usize,
    pub results: Vec<NewsSummary>,
}

/// One page of the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsPage {
    pub results: Vec<NewsListItem>,
    pub total: usize,
    pub current_page: u32,
    pub page_size: u32,
}

/// Per-status counts of live news.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsCounters {
    pub total: usize,
    pub published: usize,
    pub preview: usize,
    pub draft: usize,
}

/// Listing query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub status: i64,
    pub publish_status: StatusFilter,
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub subordinates: String,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            status: 1,
            publish_status: StatusFilter::All,
            page: 1,
            page_size: 10,
            search: String::new(),
            subordinates: "all".to_string(),
        }
    }
}

impl NewsQuery {
    /// Query string pairs. `publish_status` is omitted when listing all.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("status", self.status.to_string()),
            ("search", self.search.clone()),
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
            ("subordinates", self.subordinates.clone()),
        ];
        if let StatusFilter::Only(status) = self.publish_status {
            params.push(("publish_status", status.code().to_string()));
        }
        params
    }
}
