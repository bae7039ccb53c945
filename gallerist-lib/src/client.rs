//! HTTP client for the Art Institute of Chicago artwork catalog.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::ApiError;
use crate::error::Error;
use crate::model::Artwork;
use crate::source::PageSnapshot;
use crate::source::RecordSource;

/// Default base URL of the public artworks API.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu";

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Fields requested from the listing endpoint by default: the columns the
/// browser displays. Trimming the projection keeps page payloads small.
const DEFAULT_FIELDS: &str =
    "id,title,place_of_origin,artist_display,inscriptions,date_start,date_end";

/// Client for the artworks catalog Web API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. It is the shipped [`RecordSource`]; the browser
/// works against any source, this one fetches the real catalog.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use gallerist_lib::ArticClient;
///
/// let client = ArticClient::builder()
///     .page_size(10)
///     .timeout(Duration::from_secs(10))
///     .build();
///
/// let page = client.fetch_page(1).await?;
/// println!("{} of {} artworks", page.len(), page.total_count());
/// ```
#[derive(Clone)]
pub struct ArticClient {
    inner: Arc<ArticClientInner>,
}

struct ArticClientInner {
    base_url: String,
    page_size: usize,
    fields: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ArticClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArticClientBuilder {
        ArticClientBuilder::default()
    }

    /// Returns the base URL of the catalog API.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the configured page size.
    pub fn page_size(&self) -> usize {
        self.inner.page_size
    }

    /// Builds the listing URL for a one-based page.
    fn page_url(&self, page: u32) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.inner.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.inner.base_url)))?;
        url.set_path("/api/v1/artworks");
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &self.inner.page_size.to_string())
            .append_pair("fields", &self.inner.fields);
        Ok(url)
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(e),
        }
    }
}

impl Default for ArticClient {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Wire envelope of the artworks listing endpoint.
#[derive(Debug, Deserialize)]
struct ArtworksEnvelope {
    pagination: PaginationInfo,
    data: Vec<Artwork>,
}

/// Pagination block of the listing envelope.
#[derive(Debug, Deserialize)]
struct PaginationInfo {
    /// Total record count across all pages.
    total: usize,
}

#[async_trait]
impl RecordSource for ArticClient {
    type Record = Artwork;

    async fn fetch_page(&self, page: u32) -> Result<PageSnapshot<Artwork>, Error> {
        let url = self.page_url(page)?;
        debug!("fetching {url}");

        let mut request = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(ApiError::http(status, body)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;
        let envelope: ArtworksEnvelope = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;

        Ok(PageSnapshot::new(
            envelope.data,
            envelope.pagination.total,
        ))
    }

    fn page_size(&self) -> usize {
        self.inner.page_size
    }
}

/// Builder for constructing an [`ArticClient`].
///
/// Every field has a sensible default; `build` cannot fail.
///
/// # Example
///
/// ```
/// use gallerist_lib::ArticClient;
///
/// let client = ArticClient::builder()
///     .base_url("https://api.artic.edu")
///     .page_size(25)
///     .build();
///
/// assert_eq!(client.page_size(), 25);
/// ```
#[derive(Debug, Default)]
pub struct ArticClientBuilder {
    base_url: Option<String>,
    page_size: Option<usize>,
    fields: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ArticClientBuilder {
    /// Sets the base URL of the catalog API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the number of records per page. The server caps `limit` at 100.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the comma-separated field projection requested per record.
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Sets a per-request timeout. Without one a hung request can stall a
    /// navigation indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Supplies a preconfigured `reqwest::Client`.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the client.
    pub fn build(self) -> ArticClient {
        ArticClient {
            inner: Arc::new(ArticClientInner {
                base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
                fields: self.fields.unwrap_or_else(|| DEFAULT_FIELDS.to_string()),
                http_client: self.http_client.unwrap_or_default(),
                timeout: self.timeout,
            }),
        }
    }
}
