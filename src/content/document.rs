//! Raw documents and their view projections
//!
//! The content API returns loosely-shaped documents; projection into the
//! listing and detail view models is schema-validated and fails with
//! [`FetchError::Schema`] on mismatch instead of defaulting fields.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::FetchError;
use crate::content::RichText;

/// A raw document as returned by the content source
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Opaque unique identifier, stable per document
    pub uid: String,
    /// Absent means not yet published / draft
    #[serde(default)]
    pub first_publication_date: Option<DateTime<Utc>>,
    /// Type-specific payload, validated during projection
    pub data: serde_json::Value,
}

/// Fields needed for the listing view
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub uid: String,
    pub published_at: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

#[derive(Deserialize)]
struct SummaryData {
    title: String,
    subtitle: String,
    author: String,
}

impl PostSummary {
    /// Project a raw document into a listing summary.
    pub fn project(doc: &Document) -> Result<Self, FetchError> {
        let data: SummaryData = serde_json::from_value(doc.data.clone())
            .map_err(|e| FetchError::Schema(format!("document {}: {}", doc.uid, e)))?;
        Ok(Self {
            uid: doc.uid.clone(),
            published_at: doc.first_publication_date,
            title: data.title,
            subtitle: data.subtitle,
            author: data.author,
        })
    }
}

/// One section of a post: a heading and its rich text body
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    pub body: RichText,
}

/// Fields needed for the detail view. Block ordering is the authoritative
/// content order and is preserved through rendering.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub uid: String,
    pub published_at: Option<DateTime<Utc>>,
    pub title: String,
    pub author: String,
    pub banner_url: String,
    pub content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct DetailData {
    title: String,
    author: String,
    banner: Banner,
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct Banner {
    url: String,
}

impl PostDetail {
    /// Project a raw document into the detail view model.
    pub fn project(doc: &Document) -> Result<Self, FetchError> {
        let data: DetailData = serde_json::from_value(doc.data.clone())
            .map_err(|e| FetchError::Schema(format!("document {}: {}", doc.uid, e)))?;
        Ok(Self {
            uid: doc.uid.clone(),
            published_at: doc.first_publication_date,
            title: data.title,
            author: data.author,
            banner_url: data.banner.url,
            content: data.content,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use serde_json::json;

    use super::Document;

    /// A minimal valid document carrying both summary and detail fields.
    pub fn document(uid: &str) -> Document {
        serde_json::from_value(json!({
            "uid": uid,
            "first_publication_date": "2021-03-25T00:00:00Z",
            "data": {
                "title": format!("Title of {uid}"),
                "subtitle": "How to survive",
                "author": "Joseph Oliveira",
                "banner": { "url": "http://img.test/banner.png" },
                "content": [
                    {
                        "heading": "Section",
                        "body": [{ "type": "paragraph", "text": "Body text" }]
                    }
                ]
            }
        }))
        .unwrap()
    }

    /// A document whose payload is missing required fields.
    pub fn malformed_document(uid: &str) -> Document {
        serde_json::from_value(json!({
            "uid": uid,
            "data": { "headline": "wrong shape" }
        }))
        .unwrap()
    }
}
