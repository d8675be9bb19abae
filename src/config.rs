use clap::Args;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.quran.com/api/v4";

/// Indonesian Ministry of Religious Affairs rendering.
pub const DEFAULT_TRANSLATION: u32 = 33;

/// Knobs shared by every subcommand; each can also come from the environment.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Base URL of the Quran REST API
    #[arg(long, global = true, env = "MUSHAF_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Translation resource id shown under each ayah
    #[arg(long, global = true, env = "MUSHAF_TRANSLATION", default_value_t = DEFAULT_TRANSLATION)]
    pub translation: u32,

    /// Ayahs requested per page when reading a surah
    #[arg(long, global = true, env = "MUSHAF_PER_PAGE", default_value_t = 50,
          value_parser = clap::value_parser!(u32).range(1..=50))]
    pub per_page: u32,

    /// Give up on a request after this many seconds (default: never)
    #[arg(long, global = true, env = "MUSHAF_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Plain output without ANSI colors
    #[arg(long, global = true, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Resolved, immutable runtime settings handed to the client and the views.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base: String,
    pub translation: u32,
    pub per_page: u32,
    pub timeout: Option<Duration>,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base: DEFAULT_API_BASE.to_string(),
            translation: DEFAULT_TRANSLATION,
            per_page: 50,
            timeout: None,
            color: true,
        }
    }
}

impl From<&GlobalArgs> for Settings {
    fn from(a: &GlobalArgs) -> Self {
        Settings {
            api_base: a.api_base.trim_end_matches('/').to_string(),
            translation: a.translation,
            per_page: a.per_page,
            timeout: a.timeout_secs.map(Duration::from_secs),
            color: !a.no_color,
        }
    }
}

impl Settings {
    /// Settings pointing at another API root, e.g. a local mock server.
    pub fn with_api_base(base: impl Into<String>) -> Self {
        let base = base.into();
        Settings {
            api_base: base.trim_end_matches('/').to_string(),
            ..Settings::default()
        }
    }
}
