//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,

    // Content API
    pub api_url: Url,
    pub document_type: String,
    /// Page size of the pre-rendered first listing page
    pub page_size: usize,

    // Directory
    pub public_dir: String,

    // Serving
    /// Minutes before an on-demand generated detail page goes stale
    pub route_ttl_minutes: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),

            url: "http://example.com".to_string(),

            api_url: Url::parse("http://localhost:4010/api").expect("static url"),
            document_type: "posts".to_string(),
            page_size: 2,

            public_dir: "public".to_string(),

            route_ttl_minutes: 30,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.page_size, 2);
        assert_eq!(config.document_type, "posts");
        assert_eq!(config.route_ttl_minutes, 30);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
api_url: https://cms.example.com/api
page_size: 5
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.api_url.as_str(), "https://cms.example.com/api");
        assert_eq!(config.page_size, 5);
        // unspecified fields keep their defaults
        assert_eq!(config.route_ttl_minutes, 30);
    }
}
