//! Content API module - querying and fetching documents from the headless CMS

mod client;

pub use client::HttpContentSource;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::content::Document;

/// Errors surfaced by the content source and pagination layer
#[derive(Debug, Error)]
pub enum FetchError {
    /// The requested document does not exist
    #[error("document not found: {0}")]
    NotFound(String),

    /// Network or transport failure; the caller may retry
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected document shape
    #[error("unexpected response shape: {0}")]
    Schema(String),

    /// Pagination was invoked with no cursor present (programmer error)
    #[error("no more pages to load")]
    NoMorePages,
}

/// One page of query results from the content source
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PageResponse {
    pub results: Vec<Document>,
    /// Fully-qualified URL of the next page, or `None` on the last page
    pub next_page: Option<Url>,
}

/// Abstraction over the headless content store.
///
/// Implementations issue exactly one request per call and never retry;
/// transport failures surface as [`FetchError::Transport`].
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Query the first page of documents of a type.
    async fn query(&self, document_type: &str, page_size: usize)
        -> Result<PageResponse, FetchError>;

    /// Fetch a subsequent page by its `next_page` cursor URL.
    async fn fetch_page(&self, cursor: &Url) -> Result<PageResponse, FetchError>;

    /// Fetch a single document by its unique identifier.
    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<Document, FetchError>;
}

/// Enumerate the identifiers of every document of a type, following the
/// pagination cursor until it is exhausted.
pub async fn list_all_identifiers<S: ContentSource>(
    source: &S,
    document_type: &str,
) -> Result<Vec<String>, FetchError> {
    let mut identifiers = Vec::new();
    let mut page = source.query(document_type, 100).await?;

    loop {
        identifiers.extend(page.results.iter().map(|doc| doc.uid.clone()));
        match page.next_page {
            Some(cursor) => page = source.fetch_page(&cursor).await?,
            None => break,
        }
    }

    Ok(identifiers)
}
