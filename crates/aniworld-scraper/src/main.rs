//! Aniworld scraper CLI application.

use anyhow::{Context, Result};
use aniworld_scraper::{LogObserver, PageFetcher, Pipeline, ProgressObserver, RecordWriter, TmdbClient};
use clap::Parser;
use shared::Config;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// File with one season URL per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Season URLs passed directly
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Skip per-episode redirect extraction
    #[arg(long)]
    skip_redirects: bool,

    /// Override the output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Statistics for one scraping run
#[derive(Debug, Clone, Default)]
struct RunStats {
    urls_total: usize,
    urls_failed: usize,
    episodes_found: usize,
    records_written: usize,
    tmdb_resolved: usize,
    imdb_resolved: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging; --verbose overrides the configured level
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        shared::logging::level_from_str(&config.logging.default_level)
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "aniworld-scraper".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!("Aniworld scraper starting");
    info!(config_file = %args.config.display(), "Loaded configuration");

    let urls = collect_urls(&args)?;
    if urls.is_empty() {
        anyhow::bail!("No input URLs: pass URLs as arguments or provide --input <file>");
    }

    let base_url = Url::parse(&config.source.base_url)
        .with_context(|| format!("Invalid source base URL: {}", config.source.base_url))?;

    // Initialize collaborators
    let fetcher = PageFetcher::new(
        &config.source.user_agent,
        Duration::from_secs(config.source.request_timeout_seconds),
    )
    .context("Failed to create page fetcher")?;

    let tmdb = TmdbClient::new(
        config.tmdb.base_url.clone(),
        config.tmdb.api_key.clone(),
        config.tmdb.language.clone(),
    )
    .context("Failed to create TMDB client")?;

    let pipeline = Pipeline::new(
        fetcher,
        tmdb,
        base_url,
        Duration::from_millis(config.source.detail_delay_ms),
        !args.skip_redirects,
    );

    let out_dir = args.output.unwrap_or_else(|| config.output_dir());
    let writer = RecordWriter::new(out_dir);
    let observer = LogObserver;

    let mut stats = RunStats {
        urls_total: urls.len(),
        ..Default::default()
    };

    // Each URL is processed independently; one failure never aborts the
    // batch.
    for (idx, url) in urls.iter().enumerate() {
        info!(
            progress = format!("{}/{}", idx + 1, urls.len()),
            url = %url,
            "Processing URL"
        );

        match pipeline.process_url(url, &observer).await {
            Ok(output) => {
                stats.episodes_found += output.episodes.len();
                if !output.identity.tmdb_id.is_empty() {
                    stats.tmdb_resolved += 1;
                }
                if !output.identity.imdb_id.is_empty() {
                    stats.imdb_resolved += 1;
                }

                let season_number = output.season.number_or_default();
                writer
                    .write_redirect_records(&season_number, &output.records)
                    .context("Failed to write redirect records")?;
                writer
                    .write_episode_list(&output.episode_list())
                    .context("Failed to write episode list")?;
                stats.records_written += output.records.len();
            }
            Err(e) => {
                observer.url_failed(url, &e);
                stats.urls_failed += 1;
            }
        }
    }

    // Final statistics
    info!("=== Scraping Complete ===");
    info!("URLs processed: {}", stats.urls_total - stats.urls_failed);
    info!("URLs failed: {}", stats.urls_failed);
    info!("Episodes found: {}", stats.episodes_found);
    info!("Records written: {}", stats.records_written);
    info!("TMDB IDs resolved: {}", stats.tmdb_resolved);
    info!("IMDB IDs resolved: {}", stats.imdb_resolved);

    info!("Aniworld scraper finished");

    Ok(())
}

/// Merge direct URL arguments with the newline-separated input file.
fn collect_urls(args: &Args) -> Result<Vec<String>> {
    let mut urls = args.urls.clone();

    if let Some(path) = &args.input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read URL list: {}", path.display()))?;
        urls.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }

    Ok(urls)
}
