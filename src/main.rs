use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mushaf::browse::Session;
use mushaf::config::{GlobalArgs, Settings};
use mushaf::lookup;
use mushaf::models::CHAPTER_COUNT;
use mushaf::render::{self, Theme};
use mushaf::view::{ChapterDetailView, ChapterListView};
use mushaf::{QuranClient, Route};

#[derive(Parser)]
#[command(
    name = "mushaf",
    version,
    about = "Browse surahs and read ayahs with translation, right in the terminal",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// List surahs, optionally narrowed by name
    Ls {
        /// Case-insensitive part of the surah name, e.g. "baq"
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Read one surah with its translation
    Read {
        /// Surah number or name ("2", "al-baqarah", "baqarah")
        chapter: String,
    },
    /// Interactive session: type a path, a search, `b` for back, `q` to quit
    Browse {
        /// Where to start, "/" or "/surah/<id>"
        #[arg(default_value = "/")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.global.verbose { "mushaf=debug" } else { "mushaf=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::from(&cli.global);
    let theme = Theme { color: settings.color };
    let api = QuranClient::new(&settings).context("setting up HTTP client")?;

    match cli.cmd {
        Cmd::Ls { search } => run_ls(&api, theme, search).await,
        Cmd::Read { chapter } => run_read(&api, theme, &chapter).await,
        Cmd::Browse { path } => {
            let start: Route = path.parse().with_context(|| format!("bad start path {path:?}"))?;
            let mut session = Session::new(api, theme, start);
            let mut stdout = std::io::stdout();
            session.run(BufReader::new(tokio::io::stdin()), &mut stdout).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_for(failed: bool) -> ExitCode {
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

async fn run_ls(api: &QuranClient, theme: Theme, search: Option<String>) -> Result<ExitCode> {
    let mut view = ChapterListView::new();
    let pb = render::spinner(render::text::LOADING_LIST, true);
    view.load(api).await;
    pb.finish_and_clear();
    if let Some(s) = search {
        view.set_filter(s);
    }

    let mut out = std::io::stdout().lock();
    write!(out, "{}{}", render::title(theme), render::render_list(&view, theme))?;
    Ok(exit_for(view.state().is_failed()))
}

async fn run_read(api: &QuranClient, theme: Theme, chapter: &str) -> Result<ExitCode> {
    let pb = render::spinner(render::text::LOADING_DETAIL, true);

    // numbers go straight to the reader; names need the catalog
    let numeric = chapter.trim().parse::<u32>().ok().filter(|n| (1..=CHAPTER_COUNT).contains(n));
    let id = match numeric {
        Some(id) => id,
        None => {
            let chapters = api.fetch_chapters().await.context("loading surah list")?;
            match lookup::resolve_chapter(&chapters, chapter) {
                Some(c) => c.id,
                None => {
                    pb.finish_and_clear();
                    eprintln!("{}", theme.error(&format!("Unknown surah: {chapter}")));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    };

    let mut view = ChapterDetailView::new();
    view.load(api, id).await;
    pb.finish_and_clear();

    let mut out = std::io::stdout().lock();
    write!(out, "{}{}", render::title(theme), render::render_detail(&view, theme))?;
    Ok(exit_for(view.state().is_failed()))
}
