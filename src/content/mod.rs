//! Content module - raw documents, view projections, and rich text

mod document;
mod richtext;

pub use document::{ContentBlock, Document, PostDetail, PostSummary};
pub use richtext::{RichText, RichTextNode};

#[cfg(test)]
pub(crate) use document::testing;
