//! HTTP implementation of the content source

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use super::{ContentSource, FetchError, PageResponse};
use crate::content::Document;

/// Content source talking to the headless CMS over HTTP.
///
/// Endpoint layout:
/// - `GET {api_url}/documents?type={type}&page_size={n}` - first page
/// - `GET {next_page}` - subsequent pages (cursor is a full URL)
/// - `GET {api_url}/documents/{type}/{uid}` - single document
pub struct HttpContentSource {
    client: reqwest::Client,
    api_url: Url,
}

impl HttpContentSource {
    pub fn new(api_url: Url) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client, api_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Schema(format!("api url cannot be a base: {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn decode_page(&self, response: reqwest::Response) -> Result<PageResponse, FetchError> {
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Schema(e.to_string()))
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn query(
        &self,
        document_type: &str,
        page_size: usize,
    ) -> Result<PageResponse, FetchError> {
        let mut url = self.endpoint(&["documents"])?;
        url.query_pairs_mut()
            .append_pair("type", document_type)
            .append_pair("page_size", &page_size.to_string());

        tracing::debug!("Querying {}", url);
        let response = self.client.get(url).send().await?;
        self.decode_page(response).await
    }

    async fn fetch_page(&self, cursor: &Url) -> Result<PageResponse, FetchError> {
        tracing::debug!("Fetching page {}", cursor);
        let response = self.client.get(cursor.clone()).send().await?;
        self.decode_page(response).await
    }

    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<Document, FetchError> {
        let url = self.endpoint(&["documents", document_type, uid])?;

        tracing::debug!("Fetching document {}", url);
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(uid.to_string()));
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Schema(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpContentSource {
        let api_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
        HttpContentSource::new(api_url).unwrap()
    }

    fn post_json(uid: &str) -> serde_json::Value {
        json!({
            "uid": uid,
            "first_publication_date": "2021-03-25T00:00:00Z",
            "data": {
                "title": "A title",
                "subtitle": "A subtitle",
                "author": "An author"
            }
        })
    }

    #[tokio::test]
    async fn query_parses_results_and_cursor() {
        let server = MockServer::start().await;
        let next = format!("{}/api/documents?page=2", server.uri());
        Mock::given(method("GET"))
            .and(path("/api/documents"))
            .and(query_param("type", "posts"))
            .and(query_param("page_size", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [post_json("first"), post_json("second")],
                "next_page": next,
            })))
            .mount(&server)
            .await;

        let page = source_for(&server).query("posts", 2).await.unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].uid, "first");
        assert_eq!(page.next_page.unwrap().as_str(), next);
    }

    #[tokio::test]
    async fn query_with_null_cursor_is_last_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [post_json("only")],
                "next_page": null,
            })))
            .mount(&server)
            .await;

        let page = source_for(&server).query("posts", 2).await.unwrap();
        assert_eq!(page.results.len(), 1);
        assert!(page.next_page.is_none());
    }

    #[tokio::test]
    async fn fetch_page_hits_the_cursor_url_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/documents"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [post_json("third")],
                "next_page": null,
            })))
            .mount(&server)
            .await;

        let cursor = Url::parse(&format!("{}/api/documents?page=2", server.uri())).unwrap();
        let page = source_for(&server).fetch_page(&cursor).await.unwrap();
        assert_eq!(page.results[0].uid, "third");
    }

    #[tokio::test]
    async fn get_by_uid_maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/documents/posts/missing-id"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = source_for(&server)
            .get_by_uid("posts", "missing-id")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NotFound(uid) if uid == "missing-id"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_schema_error_not_a_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [],
            })))
            .mount(&server)
            .await;

        let err = source_for(&server).query("posts", 2).await.unwrap_err();
        assert!(matches!(err, FetchError::Schema(_)));
    }
}
