use crate::models::CHAPTER_COUNT;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The two screens of the reader, addressed by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    List,
    /// `/surah/:id`
    Detail(u32),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("no page at {0}")]
    NotFound(String),
    #[error("no surah {0} (expected 1-{max})", max = CHAPTER_COUNT)]
    BadChapter(String),
}

impl Route {
    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        // ignore query/fragment, the reader has no use for them
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segs: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        match segs.as_slice() {
            [] if path.starts_with('/') => Ok(Route::List),
            ["surah", id] if path.starts_with('/') => {
                let n: u32 = id.parse().map_err(|_| RouteError::BadChapter(id.to_string()))?;
                if (1..=CHAPTER_COUNT).contains(&n) {
                    Ok(Route::Detail(n))
                } else {
                    Err(RouteError::BadChapter(id.to_string()))
                }
            }
            _ => Err(RouteError::NotFound(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => f.write_str("/"),
            Route::Detail(id) => write!(f, "/surah/{id}"),
        }
    }
}
