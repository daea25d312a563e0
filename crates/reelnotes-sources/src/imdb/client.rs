use crate::error::SourceError;
use crate::imdb::parser;
use crate::traits::{DetailExtractor, IdResolver};
use async_trait::async_trait;
use reelnotes_config::ImdbConfig;
use reelnotes_models::{MovieId, MovieRecord};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client for the IMDb search and title pages
///
/// Single attempt per call, no retries. The request timeout comes from the
/// config and covers the whole request including the body.
#[derive(Clone)]
pub struct ImdbClient {
    client: Client,
    base_url: String,
    search_marker: String,
}

impl ImdbClient {
    pub fn new(config: &ImdbConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_marker: config.search_marker.clone(),
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}/find", self.base_url)
    }

    pub fn title_url(&self, id: &MovieId) -> String {
        format!("{}/title/{}", self.base_url, id)
    }

    async fn fetch_html(&self, url: &str, query: &[(&str, &str)]) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| SourceError::from_request(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::from_request(url, e))
    }
}

#[async_trait]
impl IdResolver for ImdbClient {
    fn source_name(&self) -> &str {
        "imdb"
    }

    async fn resolve(&self, query: &str) -> Result<MovieId, SourceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SourceError::EmptyQuery);
        }

        let url = self.search_url();
        debug!(query = %query, url = %url, "Searching IMDb");

        let params = [("q", query), ("s", "tt"), ("ttype", "ft"), ("ref_", "fn_ft")];
        let html = self.fetch_html(&url, &params).await?;

        let id = parser::parse_search_results(&html, &self.search_marker)?;
        info!(query = %query, imdb_id = %id, "Resolved search to title");
        Ok(id)
    }
}

#[async_trait]
impl DetailExtractor for ImdbClient {
    fn source_name(&self) -> &str {
        "imdb"
    }

    async fn extract(&self, id: &MovieId) -> Result<MovieRecord, SourceError> {
        let url = self.title_url(id);
        debug!(imdb_id = %id, url = %url, "Fetching title page");

        let html = self.fetch_html(&url, &[]).await?;
        let record = parser::parse_title_page(&html, &self.base_url)?;

        debug!(imdb_id = %id, title = %record.title, "Extracted title details");
        Ok(record)
    }
}
