//! # Google Books Client
//!
//! Searches the public Google Books volumes endpoint.
//!
//! ## Request / Response
//! ```text
//! GET {endpoint}?q=<query>&maxResults=<n>[&key=<api key>]
//!
//! {
//!   "totalItems": 2,
//!   "items": [                              ← absent when nothing matched
//!     { "id": "zyTCAlFPjgYC",
//!       "volumeInfo": {
//!         "title": "The Google Story",      ← optional
//!         "authors": ["David A. Vise"],     ← optional
//!         "imageLinks": { "thumbnail": "http://..." }   ← optional
//!       } }
//!   ]
//! }
//! ```
//!
//! Missing fields stay `None` here; defaults are filled when a result is
//! added to the list.

use std::time::Duration;

use bookclub_core::validation::validate_search_query;
use bookclub_core::SearchCandidate;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{SearchError, SearchResult};
use crate::CatalogSearch;

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";
pub const DEFAULT_MAX_RESULTS: u32 = 12;

const USER_AGENT: &str = concat!("stormy-book-club/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct GoogleBooksConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for GoogleBooksConfig {
    fn default() -> Self {
        GoogleBooksConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl GoogleBooksConfig {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Client
// =============================================================================

#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    client: Client,
    config: GoogleBooksConfig,
}

impl GoogleBooksClient {
    pub fn new(config: GoogleBooksConfig) -> SearchResult<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT);

        // Local mock catalogs are reached directly, never through a proxy.
        if is_loopback_endpoint(&config.endpoint) {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| SearchError::ClientSetup {
                message: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GoogleBooksConfig {
        &self.config
    }

    fn request_url(&self, query: &str, max_results: u32) -> SearchResult<Url> {
        let max_results = max_results.to_string();
        let mut params = vec![("q", query), ("maxResults", max_results.as_str())];
        if let Some(key) = self.config.api_key.as_deref() {
            params.push(("key", key));
        }

        Url::parse_with_params(&self.config.endpoint, &params).map_err(|e| {
            SearchError::RequestFailed {
                message: format!("invalid endpoint '{}': {e}", self.config.endpoint),
            }
        })
    }
}

impl CatalogSearch for GoogleBooksClient {
    async fn search(&self, query: &str, max_results: u32) -> SearchResult<Vec<SearchCandidate>> {
        let query = validate_search_query(query)?;
        if query.is_empty() {
            debug!("Empty search query; skipping request");
            return Ok(Vec::new());
        }

        let url = self.request_url(&query, max_results)?;
        debug!(query = %query, max_results, "Searching catalog");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(query = %query, "Catalog rate limit hit");
            return Err(SearchError::RateLimited);
        }
        if !status.is_success() {
            warn!(query = %query, status = status.as_u16(), "Catalog search failed");
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::InvalidResponse {
                message: e.to_string(),
            })?;

        let mut candidates = parse_volumes(&body)?;
        candidates.truncate(max_results as usize);

        info!(query = %query, results = candidates.len(), "Catalog search complete");
        Ok(candidates)
    }
}

fn is_loopback_endpoint(endpoint: &str) -> bool {
    Url::parse(endpoint)
        .ok()
        .and_then(|url| url.host_str().map(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]"))
        .unwrap_or(false)
}

// =============================================================================
// Response Parsing
// =============================================================================

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: Option<String>,
    #[serde(default)]
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

/// Parses a volumes response body into candidates, in response order.
///
/// A missing or null `items` array is an empty result. Entries without an
/// `id` cannot be added to the list and are skipped.
pub fn parse_volumes(body: &str) -> SearchResult<Vec<SearchCandidate>> {
    let response: VolumesResponse =
        serde_json::from_str(body).map_err(|e| SearchError::InvalidResponse {
            message: e.to_string(),
        })?;

    let candidates = response
        .items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|volume| {
            let Some(id) = volume.id else {
                debug!("Skipping volume without id");
                return None;
            };
            let info = volume.volume_info.unwrap_or_default();
            Some(SearchCandidate {
                id,
                title: info.title,
                authors: info.authors,
                cover_url: info.image_links.and_then(|links| links.thumbnail),
            })
        })
        .collect();

    Ok(candidates)
}

// =============================================================================
// Unit Tests
// =============================================================================
