//! Listing pagination - explicit state, pure transitions
//!
//! `PaginationState` is a value created once per page view from the
//! build-time seed and mutated only by appending one page of results and
//! replacing the cursor. There is no hidden module state and no internal
//! de-duplication: documents repeated across pages (a server cursor bug)
//! appear twice.

use url::Url;

use crate::api::{ContentSource, FetchError, PageResponse};
use crate::content::PostSummary;

/// Loaded summaries plus the cursor to the next page.
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Server-returned order, append-only
    pub loaded: Vec<PostSummary>,
    /// Absent means no further pages
    pub next_cursor: Option<Url>,
}

impl PaginationState {
    /// Build the seed state from the first page of query results.
    pub fn from_page(page: &PageResponse) -> Result<Self, FetchError> {
        let loaded = page
            .results
            .iter()
            .map(PostSummary::project)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            loaded,
            next_cursor: page.next_page.clone(),
        })
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Load the next page and return the extended state.
    ///
    /// Issues exactly one request, no retry. Requires a cursor; invoking
    /// without one is a programmer error surfaced as `NoMorePages`. On any
    /// failure `self` is untouched and may be re-used for a retry. The
    /// caller must not issue a second load while one is in flight.
    pub async fn load_next_page<S: ContentSource>(
        &self,
        source: &S,
    ) -> Result<PaginationState, FetchError> {
        let cursor = self.next_cursor.as_ref().ok_or(FetchError::NoMorePages)?;
        let page = source.fetch_page(cursor).await?;

        let appended = page
            .results
            .iter()
            .map(PostSummary::project)
            .collect::<Result<Vec<_>, _>>()?;

        let mut loaded = self.loaded.clone();
        loaded.extend(appended);
        Ok(PaginationState {
            loaded,
            next_cursor: page.next_page,
        })
    }
}

/// Phase of the client-side "load more" interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Loading,
    Error(String),
}

/// Listing view state machine: `Idle -> Loading -> Idle | Error`.
///
/// `Error` retains the previously loaded posts and permits a retry by
/// re-entering `Loading`. `Loading` is never entered without a cursor; the
/// load-more affordance is simply not offered then.
#[derive(Debug)]
pub struct ListingView {
    state: PaginationState,
    phase: ViewPhase,
}

impl ListingView {
    /// Seed the view from build-time data. No network access.
    pub fn initialize(seed: PaginationState) -> Self {
        Self {
            state: seed,
            phase: ViewPhase::Idle,
        }
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.state.loaded
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    /// Whether the load-more control should be offered.
    pub fn offers_load_more(&self) -> bool {
        self.state.has_more() && self.phase != ViewPhase::Loading
    }

    /// Drive one load-more interaction to completion.
    pub async fn load_more<S: ContentSource>(&mut self, source: &S) -> Result<(), FetchError> {
        if !self.state.has_more() {
            return Err(FetchError::NoMorePages);
        }
        self.phase = ViewPhase::Loading;
        match self.state.load_next_page(source).await {
            Ok(next) => {
                self.state = next;
                self.phase = ViewPhase::Idle;
                Ok(())
            }
            Err(err) => {
                self.phase = ViewPhase::Error(err.to_string());
                Err(err)
            }
        }
    }
}
