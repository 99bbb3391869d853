//! # AI Magazine
//!
//! Content pipeline for a statically generated magazine whose articles are
//! written by AI author personas. Every stage is a function over files: the
//! only state kept between runs is `articles.json`.
//!
//! ## Features
//!
//! - Loads author personas from `authors/index.json` and per-author profiles
//! - Researches a recent source article per author through an
//!   OpenAI-compatible chat API and drafts an opinion piece about it
//! - Generates a text-free banner image for every article
//! - Merges new articles into the store: newest first, unique by id, capped
//! - Rebuilds category statistics, navigation data, the RSS feed, the
//!   sitemap and `robots.txt`
//! - Test mode produces deterministic mock articles without any API key
//!
//! ## Usage
//!
//! ```sh
//! OPENAI_API_KEY=sk-... ai_magazine generate
//! SITE_URL=https://mag.example.org ai_magazine build
//! ```
//!
//! ## Architecture
//!
//! 1. **generate**: authors → research → draft → banner → article store
//! 2. **navigation**: article store → category stats, navigation, RSS feed
//! 3. **sitemap**: article store → sitemap.xml, robots.txt
//! 4. **build**: navigation, then sitemap

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod authors;
mod cli;
mod config;
mod generator;
mod models;
mod outputs;
mod store;
mod utils;

use api::{OpenAiClient, RetryAsk};
use cli::{Cli, Command, GenerateArgs};
use config::{Paths, SiteConfig};
use outputs::{feed, json, navigation, sitemap, stats, xml};
use utils::{ensure_writable_dir, iso_timestamp};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = Instant::now();
    info!("ai_magazine starting up");

    let args = Cli::parse();
    debug!(command = ?args.command, data_dir = %args.data_dir, public_dir = %args.public_dir, "Parsed CLI arguments");

    let config = SiteConfig::resolve(&args)?;
    let paths = Paths::from_cli(&args);

    let result = match &args.command {
        Command::Generate(gen_args) => run_generate(gen_args, &config, &paths).await,
        Command::Navigation => run_navigation(&config, &paths).await,
        Command::Sitemap => run_sitemap(&config, &paths).await,
        Command::Build => build(&config, &paths).await,
    };

    let elapsed = start_time.elapsed();
    match &result {
        Ok(()) => info!(
            elapsed_secs = elapsed.as_secs(),
            elapsed_ms = elapsed.as_millis(),
            "Execution complete"
        ),
        Err(e) => error!(error = %e, elapsed_ms = elapsed.as_millis(), "Execution failed"),
    }
    result
}

/// Draft one article per author and merge the results into the store.
#[instrument(level = "info", skip_all, fields(test_mode = args.test_mode))]
async fn run_generate(args: &GenerateArgs, config: &SiteConfig, paths: &Paths) -> Result<(), Box<dyn Error>> {
    let authors = authors::load_authors(&paths.authors_dir).await?;
    if authors.is_empty() {
        warn!("No author profiles loaded; nothing to generate");
        return Ok(());
    }

    // A corrupt store must abort before any API call.
    let now = iso_timestamp(Utc::now());
    let articles_file = paths.articles_file();
    let mut data = store::load_articles(&articles_file, &now).await?;

    let new_articles = if args.test_mode {
        info!("Test mode: generating mock articles");
        generator::mock::generate_mock_articles(&authors, Utc::now())
    } else {
        let Some(api_key) = args.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            error!("OPENAI_API_KEY is not set; use --test-mode to run without it");
            return Err("missing API key".into());
        };
        let mut config = config.clone();
        if let Some(base_url) = &args.api_base_url {
            config.api_base_url = base_url.clone();
        }
        let client = OpenAiClient::new(api_key, &config)?;
        debug!(?client, "API client ready");
        let model = RetryAsk::new(client, args.max_retries, Duration::from_secs(1));
        generator::generate_articles(&model, &authors, Duration::from_secs(args.author_delay_secs)).await
    };

    if new_articles.is_empty() {
        warn!("No articles were generated; leaving the article store untouched");
        return Ok(());
    }

    let now = iso_timestamp(Utc::now());
    let outcome = store::merge_articles(&mut data, new_articles, &now);
    if outcome.truncated > 0 {
        warn!(dropped = outcome.truncated, cap = store::ARTICLE_CAP, "Article limit reached; oldest articles dropped");
    }
    store::save_articles(&articles_file, &data).await?;

    info!(
        added = outcome.added,
        duplicates = outcome.duplicates_dropped,
        total = outcome.total,
        path = %articles_file.display(),
        "Article store updated"
    );
    Ok(())
}

/// Rebuild category statistics, navigation data and the RSS feed.
#[instrument(level = "info", skip_all)]
async fn run_navigation(config: &SiteConfig, paths: &Paths) -> Result<(), Box<dyn Error>> {
    let data = store::load_articles_or_empty(&paths.articles_file()).await;
    let now = Utc::now();

    let category_stats = stats::generate_category_stats(&data.articles, &iso_timestamp(now));
    json::write_pretty_json(&paths.category_stats_file(), &category_stats).await?;
    info!(categories = category_stats.categories.len(), authors = category_stats.authors.len(), "Wrote category stats");

    let nav = navigation::generate_navigation(&category_stats, config);
    json::write_pretty_json(&paths.navigation_file(), &nav).await?;
    info!(menu_items = nav.main_menu.len(), "Wrote navigation");

    let rss = feed::build_rss(&data.articles, config, now)?;
    xml::write_public_file(&paths.feed_file(), &rss).await?;
    info!(items = data.articles.len().min(feed::FEED_ITEM_LIMIT), "Wrote RSS feed");
    Ok(())
}

/// Rebuild `sitemap.xml` and `robots.txt`.
#[instrument(level = "info", skip_all)]
async fn run_sitemap(config: &SiteConfig, paths: &Paths) -> Result<(), Box<dyn Error>> {
    if let Err(e) = ensure_writable_dir(&paths.public_dir).await {
        error!(
            path = %paths.public_dir.display(),
            error = %e,
            "Public directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let data = store::load_articles_or_empty(&paths.articles_file()).await;
    let today = Utc::now().format("%Y-%m-%d").to_string();

    let entries = sitemap::sitemap_entries(&data, config, &today);
    xml::write_public_file(&paths.sitemap_file(), &sitemap::render_sitemap(&entries)?).await?;
    xml::write_public_file(&paths.robots_file(), &sitemap::robots_txt(config)).await?;
    info!(urls = entries.len(), "Wrote sitemap and robots.txt");
    Ok(())
}

/// Regenerate every derived artifact.
async fn build(config: &SiteConfig, paths: &Paths) -> Result<(), Box<dyn Error>> {
    run_navigation(config, paths).await?;
    run_sitemap(config, paths).await
}
