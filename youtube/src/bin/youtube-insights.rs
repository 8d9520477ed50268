use clap::Parser;
use eyre::Context;
use jiff::Timestamp;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_insights::Dataset;
use youtube_insights::report::Report;
use youtube_insights::settings::{MAX_RESULTS_LIMIT, Settings};
use youtube_insights::youtube_api::YouTubeClient;

/// Analyze the YouTube videos returned for a search query.
///
/// Prints a JSON report with one row per video plus upload timing, trending videos, and
/// content gap suggestions for the query.
#[derive(Parser, Debug)]
#[command(name = "youtube-insights", version, about)]
struct Args {
    /// JSON settings file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Search query (overrides the settings file)
    #[arg(long, short)]
    query: Option<String>,

    /// Number of search results to analyze
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_RESULTS_LIMIT as i64))]
    max_results: Option<u32>,

    /// Analyze a saved JSON array of videos instead of calling the API
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Also save the fetched videos so they can be analyzed again with --input
    #[arg(long, conflicts_with = "input")]
    save_dataset: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// IANA time zone for upload days and hours (defaults to the system zone)
    #[arg(long)]
    time_zone: Option<String>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if args.query.is_some() {
        settings.query = args.query;
    }
    if args.max_results.is_some() {
        settings.max_results = args.max_results;
    }
    if args.time_zone.is_some() {
        settings.time_zone = args.time_zone;
    }
    tracing::debug!(?settings, "loaded settings");

    let Some(query) = settings.query() else {
        eyre::bail!("no search query given; pass --query or set \"query\" in the settings file");
    };
    let tz = settings.time_zone()?;

    let dataset = match &args.input {
        Some(path) => Dataset::load(query, path)?,
        None => {
            let Some(api_key) = settings.api_key() else {
                eyre::bail!(
                    "no YouTube API key; set {} or \"apiKey\" in the settings file",
                    youtube_insights::settings::API_KEY_ENV
                );
            };
            let client = YouTubeClient::new(api_key, reqwest::Client::new());
            let max_results = settings.max_results() as usize;
            tracing::info!(query, max_results, "searching YouTube");
            let dataset = client
                .fetch_dataset(query, max_results)
                .await
                .with_context(|| format!("fetch search results for {query:?}"))?;
            if let Some(path) = &args.save_dataset {
                dataset.save(path)?;
                tracing::info!(path = %path.display(), "saved dataset");
            }
            dataset
        }
    };

    if dataset.entries.is_empty() {
        tracing::warn!(query, "no videos found");
    }

    let (videos, summary) = dataset.analyze(&settings.analysis, &tz, Timestamp::now());
    let report = Report::build(&videos, &summary);

    let output = serde_json::json!({
        "report": report,
        "analysis": summary,
    });
    let json = serde_json::to_string_pretty(&output).context("serialize report")?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote report");
        }
        None => println!("{json}"),
    }

    Ok(())
}
