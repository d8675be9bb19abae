//! Interactive reading session.
//!
//! One line of input is one interaction: a path navigates, `b` goes back to
//! the catalog, `q` quits, and anything else typed on the catalog replaces
//! the search text. Loads run in spawned tasks and report back over a
//! channel, so input is still read while a screen is loading; answers for a
//! screen the user already left are dropped.

use crate::api::{ApiResult, ChapterText, QuranClient};
use crate::models::Chapter;
use crate::render::{self, Theme};
use crate::router::{Route, RouteError};
use crate::view::{ChapterDetailView, ChapterListView, LoadTicket};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

/// What a line of input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Go(Route),
    Back,
    Quit,
    Search(String),
    BadPath(RouteError),
    Unknown(String),
}

impl Input {
    pub fn parse(line: &str, current: Route) -> Input {
        let trimmed = line.trim();
        match trimmed {
            "q" | "quit" | ":q" => Input::Quit,
            "b" | "back" => Input::Back,
            p if p.starts_with('/') => match p.parse() {
                Ok(r) => Input::Go(r),
                Err(e) => Input::BadPath(e),
            },
            // every line typed on the catalog is the new search box content
            _ if current == Route::List => Input::Search(trimmed.to_string()),
            other => Input::Unknown(other.to_string()),
        }
    }
}

enum Loaded {
    List(u64, ApiResult<Vec<Chapter>>),
    Detail(LoadTicket, ApiResult<ChapterText>),
}

pub struct Session {
    api: QuranClient,
    theme: Theme,
    progress: bool,
    route: Route,
    list: ChapterListView,
    list_epoch: u64,
    detail: ChapterDetailView,
    spinner: Option<ProgressBar>,
}

impl Session {
    pub fn new(api: QuranClient, theme: Theme, start: Route) -> Self {
        Session {
            api,
            theme,
            progress: true,
            route: start,
            list: ChapterListView::new(),
            list_epoch: 0,
            detail: ChapterDetailView::new(),
            spinner: None,
        }
    }

    /// Turn the loading spinner off (non-interactive output, tests).
    pub fn without_progress(mut self) -> Self {
        self.progress = false;
        self
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn list(&self) -> &ChapterListView {
        &self.list
    }

    pub fn detail(&self) -> &ChapterDetailView {
        &self.detail
    }

    /// Drive the session until `q` or end of input. At end of input the screen
    /// being loaded is still waited for and drawn.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut lines = input.lines();

        write!(out, "{}", render::title(self.theme))?;
        self.navigate(self.route, &tx, out)?;

        loop {
            tokio::select! {
                Some(loaded) = rx.recv() => {
                    if self.apply(loaded) {
                        self.draw(out)?;
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("reading input")? else {
                        // piped input: let the last screen finish before leaving
                        self.settle(&mut rx, out).await?;
                        break;
                    };
                    match Input::parse(&line, self.route) {
                        Input::Quit => break,
                        Input::Back => self.navigate(Route::List, &tx, out)?,
                        Input::Go(r) => self.navigate(r, &tx, out)?,
                        Input::Search(s) => {
                            self.list.set_filter(s);
                            self.draw(out)?;
                        }
                        Input::BadPath(e) => writeln!(out, "{}", self.theme.error(&e.to_string()))?,
                        Input::Unknown(s) => writeln!(
                            out,
                            "{} {}",
                            self.theme.dim(&format!("{s:?}?")),
                            render::back_control(self.theme).trim_end()
                        )?,
                    }
                }
            }
        }
        self.stop_spinner();
        out.flush()?;
        Ok(())
    }

    fn loading(&self) -> bool {
        match self.route {
            Route::List => self.list.state().is_loading(),
            Route::Detail(_) => self.detail.state().is_loading(),
        }
    }

    async fn settle<W: Write>(
        &mut self,
        rx: &mut mpsc::UnboundedReceiver<Loaded>,
        out: &mut W,
    ) -> Result<()> {
        while self.loading() {
            let Some(loaded) = rx.recv().await else { break };
            if self.apply(loaded) {
                self.draw(out)?;
            }
        }
        Ok(())
    }

    fn navigate<W: Write>(
        &mut self,
        route: Route,
        tx: &mpsc::UnboundedSender<Loaded>,
        out: &mut W,
    ) -> Result<()> {
        debug!(path = %route, "navigate");
        self.route = route;
        let api = self.api.clone();
        let tx = tx.clone();
        let message = match route {
            Route::List => {
                self.list.reset();
                self.list_epoch += 1;
                let epoch = self.list_epoch;
                tokio::spawn(async move {
                    let r = api.fetch_chapters().await;
                    let _ = tx.send(Loaded::List(epoch, r));
                });
                render::text::LOADING_LIST
            }
            Route::Detail(id) => {
                let ticket = self.detail.begin(id);
                tokio::spawn(async move {
                    let r = api.fetch_chapter_with_verses(id).await;
                    let _ = tx.send(Loaded::Detail(ticket, r));
                });
                render::text::LOADING_DETAIL
            }
        };
        self.stop_spinner();
        if self.progress {
            self.spinner = Some(render::spinner(message, true));
        } else {
            writeln!(out, "{message}")?;
        }
        Ok(())
    }

    /// Returns whether the current screen changed.
    fn apply(&mut self, loaded: Loaded) -> bool {
        let applied = match loaded {
            Loaded::List(epoch, r) => {
                if self.route != Route::List || epoch != self.list_epoch {
                    debug!(epoch, "discarding stale chapter list");
                    return false;
                }
                self.list.finish(r);
                true
            }
            Loaded::Detail(ticket, r) => {
                if self.route != Route::Detail(ticket.chapter) {
                    debug!(chapter = ticket.chapter, "discarding load for a screen we left");
                    return false;
                }
                self.detail.finish(ticket, r)
            }
        };
        if applied {
            self.stop_spinner();
        }
        applied
    }

    fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        let screen = match self.route {
            Route::List => render::render_list(&self.list, self.theme),
            Route::Detail(_) => render::render_detail(&self.detail, self.theme),
        };
        write!(out, "{screen}")?;
        write!(out, "{} ", self.theme.dim(&format!("{}>", self.route)))?;
        out.flush()?;
        Ok(())
    }

    fn stop_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}
