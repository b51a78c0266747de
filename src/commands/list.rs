//! List posts known to the content API

use anyhow::Result;

use crate::api::{ContentSource, HttpContentSource};
use crate::content::PostSummary;
use crate::helpers::format_published;
use crate::Caravel;

/// Print every post the content source knows about
pub async fn run(caravel: &Caravel) -> Result<()> {
    let source = HttpContentSource::new(caravel.config.api_url.clone())?;

    let mut summaries: Vec<PostSummary> = Vec::new();
    let mut page = source.query(&caravel.config.document_type, 100).await?;
    loop {
        for doc in &page.results {
            summaries.push(PostSummary::project(doc)?);
        }
        match page.next_page {
            Some(cursor) => page = source.fetch_page(&cursor).await?,
            None => break,
        }
    }

    println!("Posts ({}):", summaries.len());
    for post in summaries {
        let date = post
            .published_at
            .map(|d| format_published(&d))
            .unwrap_or_else(|| "draft".to_string());
        println!("  {} - {} [{}]", date, post.title, post.uid);
    }

    Ok(())
}
