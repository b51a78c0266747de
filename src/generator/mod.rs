//! Generator module - renders the listing and post pages to static HTML

use anyhow::Result;
use std::fs;
use tera::Context;

use crate::api::{self, ContentSource, FetchError};
use crate::content::{PostDetail, PostSummary};
use crate::helpers::reading_minutes;
use crate::pagination::PaginationState;
use crate::templates::{SectionData, SummaryRow, TemplateRenderer};
use crate::Caravel;

/// Static site generator backed by a content source
pub struct Generator<S: ContentSource> {
    caravel: Caravel,
    renderer: TemplateRenderer,
    source: S,
}

impl<S: ContentSource> Generator<S> {
    /// Create a new generator
    pub fn new(caravel: &Caravel, source: S) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            caravel: caravel.clone(),
            renderer,
            source,
        })
    }

    /// Generate the entire site: the listing page seeded with the first
    /// page of summaries, then one detail page per known identifier.
    pub async fn generate(&self) -> Result<()> {
        fs::create_dir_all(&self.caravel.public_dir)?;

        let seed = self.generate_index().await?;
        tracing::info!(
            "Listing page rendered with {} posts (more available: {})",
            seed.loaded.len(),
            seed.has_more()
        );

        let ids =
            api::list_all_identifiers(&self.source, &self.caravel.config.document_type).await?;
        tracing::info!("Enumerated {} post identifiers", ids.len());
        self.generate_posts(&ids).await?;

        Ok(())
    }

    /// Render the listing page and return the pagination seed it embeds.
    pub async fn generate_index(&self) -> Result<PaginationState> {
        let config = &self.caravel.config;
        let page = self
            .source
            .query(&config.document_type, config.page_size)
            .await?;
        let seed = PaginationState::from_page(&page)?;

        let rows: Vec<SummaryRow> = seed.loaded.iter().map(summary_row).collect();
        let mut context = self.base_context();
        context.insert("posts", &rows);
        context.insert(
            "next_page",
            &seed.next_cursor.as_ref().map(|url| url.to_string()),
        );

        let html = self.renderer.render("index.html", &context)?;
        let output_path = self.caravel.public_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(seed)
    }

    /// Render detail pages for the given identifiers. A `NotFound` aborts
    /// only that route; any other failure aborts the build.
    pub async fn generate_posts(&self, ids: &[String]) -> Result<()> {
        let mut generated = 0;
        for uid in ids {
            match self.generate_post(uid).await {
                Ok(()) => generated += 1,
                Err(err) => match err.downcast_ref::<FetchError>() {
                    Some(FetchError::NotFound(_)) => {
                        tracing::error!("Skipping /post/{}: document not found", uid);
                    }
                    _ => return Err(err),
                },
            }
        }
        tracing::info!("Generated {} post pages", generated);
        Ok(())
    }

    /// Render one detail page.
    pub async fn generate_post(&self, uid: &str) -> Result<()> {
        let doc = self
            .source
            .get_by_uid(&self.caravel.config.document_type, uid)
            .await?;
        let detail = PostDetail::project(&doc)?;

        let sections: Vec<SectionData> = detail
            .content
            .iter()
            .map(|block| SectionData {
                heading: block.heading.clone(),
                body_html: block.body.as_html(),
            })
            .collect();

        let mut context = self.base_context();
        context.insert("title", &detail.title);
        context.insert("author", &detail.author);
        context.insert("banner_url", &detail.banner_url);
        context.insert(
            "published_at",
            &detail.published_at.map(|d| d.to_rfc3339()),
        );
        context.insert("reading_minutes", &reading_minutes(&detail.content));
        context.insert("sections", &sections);

        let html = self.renderer.render("post.html", &context)?;

        let output_path = self
            .caravel
            .public_dir
            .join("post")
            .join(uid)
            .join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated post: {:?}", output_path);

        Ok(())
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site_title", &self.caravel.config.title);
        context
    }
}

fn summary_row(summary: &PostSummary) -> SummaryRow {
    SummaryRow {
        uid: summary.uid.clone(),
        title: summary.title.clone(),
        subtitle: summary.subtitle.clone(),
        author: summary.author.clone(),
        published_at: summary.published_at.map(|d| d.to_rfc3339()),
    }
}
