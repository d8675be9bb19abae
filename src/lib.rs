//! Terminal reader for the Quran.com REST API: a searchable surah list and a
//! surah reader with sanitized translations, addressed by `/` and `/surah/:id`.

pub mod api;
pub mod browse;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod render;
pub mod router;
pub mod sanitize;
pub mod view;

pub use api::{ChapterText, QuranClient};
pub use config::Settings;
pub use error::ApiError;
pub use router::Route;
pub use sanitize::sanitize;
