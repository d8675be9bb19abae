//! Screen state for the chapter list and the chapter reader.
//!
//! Both screens move `Loading -> Ready | Failed` and never sit in any other
//! combination. Errors from the API never escape a view; they become the
//! `Failed` message shown on the error screen.

use crate::api::{ApiResult, ChapterText, QuranClient};
use crate::error::ApiError;
use crate::lookup::filter_chapters;
use crate::models::Chapter;
use crate::router::Route;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewState::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(t) => Some(t),
            _ => None,
        }
    }

    fn settle(r: ApiResult<T>) -> Self {
        match r {
            Ok(t) => ViewState::Ready(t),
            Err(e) => ViewState::Failed(e.to_string()),
        }
    }
}

/// The searchable surah catalog.
#[derive(Debug)]
pub struct ChapterListView {
    state: ViewState<Vec<Chapter>>,
    filter: String,
}

impl Default for ChapterListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChapterListView {
    pub fn new() -> Self {
        ChapterListView { state: ViewState::Loading, filter: String::new() }
    }

    pub fn state(&self) -> &ViewState<Vec<Chapter>> {
        &self.state
    }

    /// Back to `Loading` with a fresh search box, as on entering the screen.
    pub fn reset(&mut self) {
        self.state = ViewState::Loading;
        self.filter.clear();
    }

    pub async fn load(&mut self, api: &QuranClient) {
        self.reset();
        let r = api.fetch_chapters().await;
        self.finish(r);
    }

    pub fn finish(&mut self, result: ApiResult<Vec<Chapter>>) {
        if let Err(e) = &result {
            warn!(error = %e, "chapter list failed to load");
        }
        self.state = ViewState::settle(result);
        debug!(failed = self.state.is_failed(), "chapter list settled");
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, s: impl Into<String>) {
        self.filter = s.into();
    }

    /// The catalog narrowed by the current search text; empty unless ready.
    pub fn visible(&self) -> Vec<&Chapter> {
        match &self.state {
            ViewState::Ready(all) => filter_chapters(all, &self.filter),
            _ => Vec::new(),
        }
    }
}

/// Identifies one load of the reader so late answers can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub chapter: u32,
    generation: u64,
}

/// The reader for one surah: header plus ordered ayahs.
#[derive(Debug)]
pub struct ChapterDetailView {
    state: ViewState<ChapterText>,
    active: Option<LoadTicket>,
    generation: u64,
}

impl Default for ChapterDetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChapterDetailView {
    pub fn new() -> Self {
        ChapterDetailView { state: ViewState::Loading, active: None, generation: 0 }
    }

    pub fn state(&self) -> &ViewState<ChapterText> {
        &self.state
    }

    pub fn chapter_id(&self) -> Option<u32> {
        self.active.map(|t| t.chapter)
    }

    /// Enter `Loading` for `chapter`. Any load still in flight is superseded.
    pub fn begin(&mut self, chapter: u32) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket { chapter, generation: self.generation };
        self.active = Some(ticket);
        self.state = ViewState::Loading;
        debug!(chapter, generation = self.generation, "reader loading");
        ticket
    }

    /// Apply a finished load. Returns `false` (and changes nothing) when the
    /// ticket is no longer the active one.
    pub fn finish(&mut self, ticket: LoadTicket, result: ApiResult<ChapterText>) -> bool {
        if self.active != Some(ticket) {
            debug!(chapter = ticket.chapter, "discarding superseded load");
            return false;
        }
        let result = result.and_then(|mut text| {
            text.verses.sort_by_key(|v| v.verse_number);
            if let Some(w) = text.verses.windows(2).find(|w| w[0].verse_number == w[1].verse_number) {
                return Err(ApiError::InvalidShape {
                    url: Route::Detail(ticket.chapter).path(),
                    reason: format!("verse {} appears twice", w[1].verse_key),
                });
            }
            Ok(text)
        });
        if let Err(e) = &result {
            warn!(chapter = ticket.chapter, error = %e, "reader failed to load");
        }
        self.state = ViewState::settle(result);
        true
    }

    pub async fn load(&mut self, api: &QuranClient, chapter: u32) {
        let ticket = self.begin(chapter);
        let r = api.fetch_chapter_with_verses(chapter).await;
        self.finish(ticket, r);
    }
}
