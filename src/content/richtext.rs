//! Structured rich text as delivered by the content API
//!
//! A rich text field is an ordered sequence of typed nodes. The conversion
//! contract is fixed: `as_text` yields the plain text of every textual node
//! joined by single spaces, `as_html` yields markup with consecutive list
//! items grouped into a single list element.

use serde::Deserialize;

/// One node of a rich text document
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum RichTextNode {
    #[serde(rename = "paragraph")]
    Paragraph { text: String },

    #[serde(
        rename = "heading1",
        alias = "heading2",
        alias = "heading3",
        alias = "heading4",
        alias = "heading5",
        alias = "heading6"
    )]
    Heading { text: String },

    #[serde(rename = "list-item")]
    ListItem { text: String },

    #[serde(rename = "o-list-item")]
    OrderedListItem { text: String },

    #[serde(rename = "preformatted")]
    Preformatted { text: String },

    #[serde(rename = "image")]
    Image {
        url: String,
        #[serde(default)]
        alt: Option<String>,
    },
}

impl RichTextNode {
    fn text(&self) -> Option<&str> {
        match self {
            RichTextNode::Paragraph { text }
            | RichTextNode::Heading { text }
            | RichTextNode::ListItem { text }
            | RichTextNode::OrderedListItem { text }
            | RichTextNode::Preformatted { text } => Some(text),
            RichTextNode::Image { .. } => None,
        }
    }
}

/// An ordered rich text document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<RichTextNode>);

impl RichText {
    /// Plain text of all textual nodes, joined by single spaces.
    pub fn as_text(&self) -> String {
        let parts: Vec<&str> = self.0.iter().filter_map(|node| node.text()).collect();
        parts.join(" ")
    }

    /// HTML markup preserving node order. Runs of list items collapse into
    /// one `<ul>`/`<ol>`.
    pub fn as_html(&self) -> String {
        let mut html = String::new();
        let mut open_list: Option<&str> = None;

        for node in &self.0 {
            let wanted = match node {
                RichTextNode::ListItem { .. } => Some("ul"),
                RichTextNode::OrderedListItem { .. } => Some("ol"),
                _ => None,
            };
            if open_list != wanted {
                if let Some(tag) = open_list {
                    html.push_str(&format!("</{}>", tag));
                }
                if let Some(tag) = wanted {
                    html.push_str(&format!("<{}>", tag));
                }
                open_list = wanted;
            }

            match node {
                RichTextNode::Paragraph { text } => {
                    html.push_str(&format!("<p>{}</p>", escape_html(text)));
                }
                RichTextNode::Heading { text } => {
                    html.push_str(&format!("<h3>{}</h3>", escape_html(text)));
                }
                RichTextNode::ListItem { text } | RichTextNode::OrderedListItem { text } => {
                    html.push_str(&format!("<li>{}</li>", escape_html(text)));
                }
                RichTextNode::Preformatted { text } => {
                    html.push_str(&format!("<pre>{}</pre>", escape_html(text)));
                }
                RichTextNode::Image { url, alt } => {
                    html.push_str(&format!(
                        r#"<img src="{}" alt="{}">"#,
                        escape_html(url),
                        escape_html(alt.as_deref().unwrap_or(""))
                    ));
                }
            }
        }

        if let Some(tag) = open_list {
            html.push_str(&format!("</{}>", tag));
        }

        html
    }
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
