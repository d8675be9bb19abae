//! Turns view state into terminal text. Everything here is pure so the
//! screens can be checked without a terminal.

use crate::models::Chapter;
use crate::router::Route;
use crate::sanitize::sanitize;
use crate::view::{ChapterDetailView, ChapterListView, ViewState};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::fmt::Write;
use std::time::Duration;

/// UI copy, in the language the reader was written for.
pub mod text {
    pub const TITLE: &str = "Al-Qur'an Digital";
    pub const LOADING_LIST: &str = "Memuat surah...";
    pub const LOADING_DETAIL: &str = "Memuat Surah...";
    pub const SEARCH: &str = "Cari surah...";
    pub const NO_MATCH: &str = "Tidak ada surah yang cocok";
    pub const EMPTY: &str = "Tidak ada surah";
    pub const VERSES: &str = "ayat";
    pub const VERSE: &str = "Ayat";
    pub const TRANSLATION: &str = "Terjemahan:";
    pub const NO_TRANSLATION: &str = "Terjemahan tidak tersedia";
    pub const LOAD_FAILED: &str = "Gagal Memuat Data";
    pub const BACK_TO_LIST: &str = "Kembali ke Daftar Surah";
    pub const LIST: &str = "Daftar Surah";
    pub const BACK: &str = "Kembali";
}

/// Colors on or off; off gives plain text suitable for pipes and tests.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub color: bool,
}

impl Theme {
    pub fn plain() -> Self {
        Theme { color: false }
    }

    fn paint(&self, s: &str, f: impl Fn(&str) -> String) -> String {
        if self.color { f(s) } else { s.to_string() }
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(s, |s| s.bold().to_string())
    }
    pub fn dim(&self, s: &str) -> String {
        self.paint(s, |s| s.dimmed().to_string())
    }
    pub fn accent(&self, s: &str) -> String {
        self.paint(s, |s| s.green().bold().to_string())
    }
    pub fn arabic(&self, s: &str) -> String {
        self.paint(s, |s| s.bright_white().bold().to_string())
    }
    pub fn link(&self, s: &str) -> String {
        self.paint(s, |s| s.blue().underline().to_string())
    }
    pub fn error(&self, s: &str) -> String {
        self.paint(s, |s| s.red().bold().to_string())
    }
}

pub fn title(theme: Theme) -> String {
    format!("{}\n", theme.accent(text::TITLE))
}

fn list_item(out: &mut String, c: &Chapter, theme: Theme) {
    let id = format!("{:>3}", c.id);
    let name = format!("{:<20}", c.name_simple);
    let count = format!("{} {}", c.verses_count, text::VERSES);
    let _ = writeln!(out, "{}  {}  {}", theme.accent(&id), theme.bold(&name), count);
    let _ = writeln!(
        out,
        "     {}  {}  {}",
        theme.dim(&format!("{:<20}", c.translated_name.name)),
        theme.dim(&c.revelation_place.to_string()),
        theme.link(&Route::Detail(c.id).path()),
    );
}

pub fn render_list(view: &ChapterListView, theme: Theme) -> String {
    let mut out = String::new();
    match view.state() {
        ViewState::Loading => {
            let _ = writeln!(out, "{}", text::LOADING_LIST);
        }
        ViewState::Failed(msg) => out.push_str(&render_error(msg, theme)),
        ViewState::Ready(all) => {
            let search = if view.filter().is_empty() {
                theme.dim(text::SEARCH)
            } else {
                theme.bold(view.filter())
            };
            let _ = writeln!(out, "🔍 {search}\n");
            let shown = view.visible();
            if all.is_empty() {
                let _ = writeln!(out, "{}", theme.dim(text::EMPTY));
            } else if shown.is_empty() {
                let _ = writeln!(out, "{}", theme.dim(text::NO_MATCH));
            }
            for c in shown {
                list_item(&mut out, c, theme);
            }
        }
    }
    out
}

/// Translations are printed as sanitized text, which stays entity-escaped:
/// an `&` in the source shows as `&amp;`, a no-break space as `&nbsp;`.
pub fn render_detail(view: &ChapterDetailView, theme: Theme) -> String {
    let mut out = String::new();
    let loaded = match view.state() {
        ViewState::Loading => {
            let _ = writeln!(out, "{}", text::LOADING_DETAIL);
            return out;
        }
        ViewState::Failed(msg) => return render_error(msg, theme),
        ViewState::Ready(loaded) => loaded,
    };
    let c = &loaded.chapter;

    let _ = writeln!(out, "← {}  {}", text::LIST, theme.link(&Route::List.path()));
    let _ = writeln!(out, "{}", theme.bold(&c.name_simple));
    let _ = writeln!(
        out,
        "{} • {} {}",
        theme.accent(&c.revelation_place.to_string()),
        c.verses_count,
        text::VERSE,
    );
    let _ = writeln!(out, "\n    {}\n", theme.arabic(&c.name_arabic));

    for v in &loaded.verses {
        let _ = writeln!(out, "{}", theme.dim(&"─".repeat(48)));
        let _ = writeln!(
            out,
            "({}) {} {}    {}",
            theme.accent(&v.verse_number.to_string()),
            text::VERSE,
            v.verse_number,
            theme.dim(&v.verse_key.to_string()),
        );
        let _ = writeln!(out, "{}", theme.arabic(&v.text_uthmani));
        let _ = writeln!(out, "{}", theme.accent(text::TRANSLATION));
        match v.translation_text() {
            Some(raw) => {
                let _ = writeln!(out, "\"{}\"", sanitize(Some(raw)));
            }
            None => {
                let _ = writeln!(out, "{}", theme.dim(text::NO_TRANSLATION));
            }
        }
    }
    out.push('\n');
    out.push_str(&back_control(theme));
    out
}

/// The always-present way back to the catalog.
pub fn back_control(theme: Theme) -> String {
    format!("[b] ← {}  {}\n", theme.bold(text::BACK), theme.link(&Route::List.path()))
}

/// Spinner on stderr while a screen is `Loading`; hidden when not wanted.
pub fn spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn render_error(message: &str, theme: Theme) -> String {
    format!(
        "⚠️  {}\n{}\n\n← {}  {}\n",
        theme.error(text::LOAD_FAILED),
        theme.error(message),
        text::BACK_TO_LIST,
        theme.link(&Route::List.path()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChapterText;
    use crate::error::ApiError;
    use crate::lookup::tests::chapter;
    use crate::models::{Translation, Verse, VerseKey};

    fn verse(n: u32, translation: Option<&str>) -> Verse {
        Verse {
            id: n,
            verse_number: n,
            verse_key: VerseKey { chapter: 1, verse: n },
            text_uthmani: format!("آية {n}"),
            translations: translation
                .map(|t| vec![Translation { resource_id: Some(33), text: Some(t.into()) }])
                .unwrap_or_default(),
        }
    }

    #[test]
    fn list_shows_filtered_items_with_links() {
        let mut v = ChapterListView::new();
        v.finish(Ok(vec![chapter(1, "Al-Fatihah", ""), chapter(2, "Al-Baqarah", "")]));
        v.set_filter("baq");
        let out = render_list(&v, Theme::plain());
        assert!(out.contains("Al-Baqarah"));
        assert!(out.contains("/surah/2"));
        assert!(!out.contains("Al-Fatihah"));
    }

    #[test]
    fn list_distinguishes_no_match_empty_and_failed() {
        let mut v = ChapterListView::new();
        v.finish(Ok(vec![chapter(1, "Al-Fatihah", "")]));
        v.set_filter("zzz");
        assert!(render_list(&v, Theme::plain()).contains(text::NO_MATCH));

        v.finish(Ok(vec![]));
        assert!(render_list(&v, Theme::plain()).contains(text::EMPTY));

        v.finish(Err(ApiError::InvalidShape { url: "u".into(), reason: "r".into() }));
        assert!(render_list(&v, Theme::plain()).contains(text::LOAD_FAILED));
    }

    #[test]
    fn detail_quotes_sanitized_translation_or_placeholder() {
        let mut v = ChapterDetailView::new();
        let t = v.begin(1);
        v.finish(
            t,
            Ok(ChapterText {
                chapter: chapter(1, "Al-Fatihah", ""),
                verses: vec![
                    verse(1, Some("Allah is Most Merciful<sup foot_note=123>1</sup>.")),
                    verse(2, None),
                ],
            }),
        );
        let out = render_detail(&v, Theme::plain());
        assert!(out.contains("\"Allah is Most Merciful.\""), "{out}");
        assert!(!out.contains("sup"));
        assert!(out.contains(text::NO_TRANSLATION));
        assert!(out.contains("1:2"));
        assert!(out.contains("7 Ayat"));
        assert!(out.contains(&back_control(Theme::plain())));
    }

    #[test]
    fn error_screen_links_home() {
        let out = render_error("HTTP 500", Theme::plain());
        assert!(out.contains(text::LOAD_FAILED));
        assert!(out.contains("HTTP 500"));
        assert!(out.contains(text::BACK_TO_LIST));
        assert!(out.trim_end().ends_with('/'));
    }
}
