// src/services/client.rs

//! News REST API client.
//!
//! Request construction is separated from execution (`*_request` methods)
//! so the exact method, path and query of each call can be inspected
//! without a server.

use std::time::Duration;

use reqwest::{Client, Request, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    ApiConfig, AssignmentPolicy, News, NewsCounters, NewsListItem, NewsListResponse, NewsPage,
    NewsQuery,
};

use super::editor::NewsPayload;

const NEWS_PATH: &str = "/api/v2/news/";
const COUNTERS_PATH: &str = "/api/v2/news_counters/";
const TEST_ASSIGNMENT_PATH: &str = "/api/v1/employees/test_kql/";

/// Client for the news and employee endpoints.
pub struct NewsClient {
    client: Client,
    base_url: Url,
}

impl NewsClient {
    /// Create a client from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = Url::parse(&config.base_url)?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn news_url(&self, id: &str) -> Result<Url> {
        self.endpoint(&format!("{NEWS_PATH}{}/", id.trim()))
    }

    // --- Request builders ---

    pub fn list_request(&self, query: &NewsQuery) -> Result<Request> {
        Ok(self
            .client
            .get(self.endpoint(NEWS_PATH)?)
            .query(&query.to_params())
            .build()?)
    }

    pub fn counters_request(&self, status: i64, subordinates: &str) -> Result<Request> {
        Ok(self
            .client
            .get(self.endpoint(COUNTERS_PATH)?)
            .query(&[("status", status.to_string()), ("subordinates", subordinates.to_string())])
            .build()?)
    }

    pub fn get_request(&self, id: &str, subordinates: &str) -> Result<Request> {
        Ok(self
            .client
            .get(self.news_url(id)?)
            .query(&[("subordinates", subordinates)])
            .build()?)
    }

    pub fn create_request(&self, payload: &NewsPayload) -> Result<Request> {
        Ok(self
            .client
            .post(self.endpoint(NEWS_PATH)?)
            .json(payload)
            .build()?)
    }

    pub fn update_request(&self, id: &str, payload: &NewsPayload) -> Result<Request> {
        Ok(self
            .client
            .put(self.news_url(id)?)
            .json(payload)
            .build()?)
    }

    pub fn delete_request(&self, id: &str) -> Result<Request> {
        Ok(self
            .client
            .delete(self.news_url(id)?)
            .build()?)
    }

    pub fn test_assignment_request(&self, policy: &AssignmentPolicy) -> Result<Request> {
        Ok(self
            .client
            .post(self.endpoint(TEST_ASSIGNMENT_PATH)?)
            .json(policy)
            .build()?)
    }

    // --- Operations ---

    /// Fetch one page of news.
    pub async fn list(&self, query: &NewsQuery) -> Result<NewsPage> {
        let response: NewsListResponse = self.fetch_json(self.list_request(query)?).await?;
        log::debug!(
            "Listed {} of {} news (page {})",
            response.results.len(),
            response.count,
            query.page
        );

        Ok(NewsPage {
            results: response
                .results
                .into_iter()
                .map(NewsListItem::from)
                .collect(),
            total: response.count,
            current_page: query.page,
            page_size: query.page_size,
        })
    }

    /// Fetch per-status counters.
    pub async fn counters(&self, status: i64, subordinates: &str) -> Result<NewsCounters> {
        self.fetch_json(self.counters_request(status, subordinates)?)
            .await
    }

    /// Fetch a full news record.
    pub async fn get(&self, id: &str, subordinates: &str) -> Result<News> {
        self.fetch_json(self.get_request(id, subordinates)?).await
    }

    /// Create a news item.
    pub async fn create(&self, payload: &NewsPayload) -> Result<News> {
        let news: News = self.fetch_json(self.create_request(payload)?).await?;
        log::info!("Created news {} '{}'", news.id, news.title);
        Ok(news)
    }

    /// Replace a news item.
    pub async fn update(&self, id: &str, payload: &NewsPayload) -> Result<News> {
        let news: News = self.fetch_json(self.update_request(id, payload)?).await?;
        log::info!("Updated news {}", news.id);
        Ok(news)
    }

    /// Delete a news item.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.send(self.delete_request(id)?).await?;
        log::info!("Deleted news {}", id);
        Ok(())
    }

    /// Dry-run an assignment policy and return the matched employees as sent by the backend.
    pub async fn test_assignment(&self, policy: &AssignmentPolicy) -> Result<serde_json::Value> {
        self.fetch_json(self.test_assignment_request(policy)?)
            .await
    }

    async fn send(&self, request: Request) -> Result<Response> {
        log::debug!("{} {}", request.method(), request.url());
        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::warn!("News API returned {}: {}", status, body);
        Err(AppError::api(status.as_u16(), body))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
