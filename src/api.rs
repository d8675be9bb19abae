use crate::config::Settings;
use crate::error::ApiError;
use crate::models::{Chapter, ChapterEnvelope, ChaptersResponse, Verse, VersesResponse};
use futures_util::future;
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashSet;
use tracing::debug;

pub type ApiResult<T> = Result<T, ApiError>;

// keep verse responses skinny & predictable
const VERSE_FIELDS: &str = "text_uthmani,verse_key";

#[derive(Debug, Clone, Serialize)]
pub struct VersesQuery {
    pub translations: u32,
    pub fields: String,
    pub words: bool,
    pub page: u32,
    pub per_page: u32,
}

/// A surah's metadata together with all of its ayahs.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterText {
    pub chapter: Chapter,
    pub verses: Vec<Verse>,
}

/// Read-only client for the handful of endpoints the reader needs.
#[derive(Debug, Clone)]
pub struct QuranClient {
    http: Client,
    base: String,
    translation: u32,
    per_page: u32,
}

impl QuranClient {
    pub fn new(settings: &Settings) -> ApiResult<Self> {
        let mut builder = Client::builder().user_agent(concat!("mushaf/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = settings.timeout {
            builder = builder.timeout(t);
        }
        Ok(QuranClient {
            http: builder.build()?,
            base: settings.api_base.clone(),
            translation: settings.translation,
            per_page: settings.per_page,
        })
    }

    async fn get_json<T, Q>(&self, url: &str, query: Option<&Q>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!(url, "GET");
        let mut req = self.http.get(url);
        if let Some(q) = query {
            req = req.query(q);
        }
        let resp = req.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status { url: url.to_string(), status });
        }

        resp.json::<T>().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// `GET /chapters`
    pub async fn fetch_chapters(&self) -> ApiResult<Vec<Chapter>> {
        let url = format!("{}/chapters", self.base);
        let r: ChaptersResponse = self.get_json(&url, None::<&()>).await?;
        for c in &r.chapters {
            c.validate()
                .map_err(|reason| ApiError::InvalidShape { url: url.clone(), reason })?;
        }
        debug!(count = r.chapters.len(), "chapters loaded");
        Ok(r.chapters)
    }

    /// `GET /chapters/{id}`
    pub async fn fetch_chapter(&self, id: u32) -> ApiResult<Chapter> {
        let url = format!("{}/chapters/{id}", self.base);
        let r: ChapterEnvelope = self.get_json(&url, None::<&()>).await?;
        r.chapter
            .validate()
            .map_err(|reason| ApiError::InvalidShape { url: url.clone(), reason })?;
        if r.chapter.id != id {
            return Err(ApiError::InvalidShape {
                url,
                reason: format!("asked for chapter {id}, got {}", r.chapter.id),
            });
        }
        Ok(r.chapter)
    }

    /// `GET /verses/by_chapter/{id}`, following pagination until the last page.
    pub async fn fetch_verses(&self, id: u32) -> ApiResult<Vec<Verse>> {
        let url = format!("{}/verses/by_chapter/{id}", self.base);
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut page = 1u32;
        loop {
            let q = VersesQuery {
                translations: self.translation,
                fields: VERSE_FIELDS.into(),
                words: false,
                page,
                per_page: self.per_page,
            };
            let parsed: VersesResponse = self.get_json(&url, Some(&q)).await?;
            for v in &parsed.verses {
                v.validate(id)
                    .map_err(|reason| ApiError::InvalidShape { url: url.clone(), reason })?;
                // numbers are unique per chapter, across pages too
                if !seen.insert(v.verse_number) {
                    return Err(ApiError::InvalidShape {
                        url,
                        reason: format!("verse {} returned twice", v.verse_key),
                    });
                }
            }
            if parsed.verses.is_empty() {
                break;
            }
            out.extend(parsed.verses);
            match parsed.pagination.and_then(|p| p.next_page) {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }
        debug!(chapter = id, count = out.len(), "verses loaded");
        Ok(out)
    }

    /// Metadata and verses fetched concurrently; either failure fails the whole.
    pub async fn fetch_chapter_with_verses(&self, id: u32) -> ApiResult<ChapterText> {
        let (chapter, verses) =
            future::try_join(self.fetch_chapter(id), self.fetch_verses(id)).await?;
        Ok(ChapterText { chapter, verses })
    }
}
