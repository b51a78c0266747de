//! Built-in theme templates using the Tera template engine
//!
//! All templates are embedded in the binary; there is no theme directory to
//! resolve at runtime.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::format_published;

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Rendered rich text is already escaped HTML; autoescaping would
        // double-escape it
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("post.html", include_str!("theme/post.html")),
            (
                "partials/header.html",
                include_str!("theme/partials/header.html"),
            ),
        ])?;

        tera.register_filter("published_date", published_date_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Summary row handed to the listing template
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// RFC 3339, formatted by the `published_date` filter
    pub published_at: Option<String>,
}

/// Content section handed to the post template
#[derive(Debug, Serialize)]
pub struct SectionData {
    pub heading: String,
    pub body_html: String,
}

/// Tera filter: format an RFC 3339 timestamp in the site's fixed locale
fn published_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("published_date", "value", String, value);
    let date: DateTime<Utc> = s
        .parse()
        .map_err(|e| tera::Error::msg(format!("published_date: {e}")))?;
    Ok(tera::Value::String(format_published(&date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::new().unwrap()
    }

    fn summary(uid: &str) -> SummaryRow {
        SummaryRow {
            uid: uid.to_string(),
            title: format!("Title of {uid}"),
            subtitle: "Subtitle".to_string(),
            author: "Ana".to_string(),
            published_at: Some("2021-03-25T00:00:00Z".to_string()),
        }
    }

    fn base_context() -> Context {
        let mut context = Context::new();
        context.insert("site_title", "spacetraveling");
        context
    }

    #[test]
    fn index_renders_summaries_with_formatted_dates() {
        let mut context = base_context();
        context.insert("posts", &vec![summary("first"), summary("second")]);
        context.insert("next_page", &Option::<String>::None);

        let html = renderer().render("index.html", &context).unwrap();
        assert!(html.contains("Title of first"));
        assert!(html.contains("Title of second"));
        assert!(html.contains("25 mar 2021"));
        assert!(html.contains(r#"href="/post/first/""#));
    }

    #[test]
    fn load_more_button_only_renders_with_a_cursor() {
        let mut context = base_context();
        context.insert("posts", &vec![summary("one")]);
        context.insert("next_page", &Option::<String>::None);
        let html = renderer().render("index.html", &context).unwrap();
        assert!(!html.contains("Carregar mais posts"));

        context.insert(
            "next_page",
            &Some("http://cms.test/api/documents?page=2".to_string()),
        );
        let html = renderer().render("index.html", &context).unwrap();
        assert!(html.contains("Carregar mais posts"));
        assert!(html.contains("http://cms.test/api/documents?page=2"));
    }

    #[test]
    fn post_renders_sections_in_order() {
        let mut context = base_context();
        context.insert("title", "A voyage");
        context.insert("author", "Ana");
        context.insert("banner_url", "http://img.test/banner.png");
        context.insert("published_at", &Some("2021-03-25T00:00:00Z".to_string()));
        context.insert("reading_minutes", &4);
        context.insert(
            "sections",
            &vec![
                SectionData {
                    heading: "Alpha".into(),
                    body_html: "<p>first</p>".into(),
                },
                SectionData {
                    heading: "Beta".into(),
                    body_html: "<p>second</p>".into(),
                },
            ],
        );

        let html = renderer().render("post.html", &context).unwrap();
        let alpha = html.find("Alpha").unwrap();
        let beta = html.find("Beta").unwrap();
        assert!(alpha < beta);
        assert!(html.contains("4 min"));
        assert!(html.contains("25 mar 2021"));
        assert!(html.contains(r#"src="http://img.test/banner.png""#));
    }
}
