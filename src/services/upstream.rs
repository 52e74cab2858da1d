use crate::models::book::{null_as_default, BookInformation};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

pub const DEFAULT_BOOKS_API_URL: &str = "https://www.googleapis.com/books/v1/volumes";

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("making GET request: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream responded with status {0}")]
    Status(u16),
    #[error("decoding response: {0}")]
    Decode(String),
}

/// A paginated search over book records.
///
/// `start_index` is the number of candidates the caller has already consumed,
/// so every call asks for the page that follows them.
#[async_trait]
pub trait BookSource {
    async fn search(
        &self,
        query: &str,
        start_index: usize,
    ) -> Result<Vec<BookInformation>, UpstreamError>;
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<VolumeItem>,
}

#[derive(Debug, Deserialize)]
struct VolumeItem {
    #[serde(rename = "volumeInfo", default, deserialize_with = "null_as_default")]
    volume_info: BookInformation,
}

fn decode_volumes(body: &str) -> Result<Vec<BookInformation>, UpstreamError> {
    let response: VolumesResponse =
        serde_json::from_str(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

    Ok(response
        .items
        .into_iter()
        .map(|item| item.volume_info)
        .collect())
}

/// Client for the Google Books volumes search endpoint.
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
}

impl GoogleBooksClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BookSource for GoogleBooksClient {
    async fn search(
        &self,
        query: &str,
        start_index: usize,
    ) -> Result<Vec<BookInformation>, UpstreamError> {
        debug!(
            "Searching {} for '{}' from index {}",
            self.base_url, query, start_index
        );

        let start_index = start_index.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("startIndex", start_index.as_str())])
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", self.base_url, e);
                UpstreamError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Upstream search for '{}' returned {}", query, status);
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(UpstreamError::Transport)?;
        let page = decode_volumes(&body)?;

        debug!("Upstream returned {} candidates for '{}'", page.len(), query);
        Ok(page)
    }
}
