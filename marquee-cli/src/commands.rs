//! CLI command implementations

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Subcommand;
use marquee_core::controller::SearchSnapshot;
use marquee_core::{
    MarqueeConfig, MediaTypeFilter, QueryControllerHandle, SearchFilters, ViewportMetrics,
    spawn_query_controller,
};
use marquee_search::OmdbClient;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search movies by title
    Search {
        /// Search term
        query: String,
        /// Restrict results to a media type
        #[arg(long, value_enum)]
        media_type: Option<MediaTypeFilter>,
        /// Restrict results to a 4-digit release year
        #[arg(long)]
        year: Option<String>,
        /// Number of result pages to accumulate
        #[arg(long, default_value = "1")]
        pages: u32,
    },
    /// Show discovery results for a randomly drawn keyword
    Discover {
        /// Restrict results to a media type
        #[arg(long, value_enum)]
        media_type: Option<MediaTypeFilter>,
        /// Restrict results to a 4-digit release year
        #[arg(long)]
        year: Option<String>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Search {
            query,
            media_type,
            year,
            pages,
        } => search(query, media_type, year, pages).await,
        Commands::Discover { media_type, year } => discover(media_type, year).await,
    }
}

/// Search for movies by title, accumulating up to `pages` result pages.
async fn search(
    query: String,
    media_type: Option<MediaTypeFilter>,
    year: Option<String>,
    pages: u32,
) -> anyhow::Result<()> {
    let handle = spawn_controller()?;

    handle.set_query_text(query).await?;
    apply_filters(&handle, media_type, year).await?;

    let mut snapshot = wait_until_settled(&handle).await?;
    let mut fetched_pages = 1;
    while fetched_pages < pages {
        let advanced = handle
            .report_scroll(ViewportMetrics::at_bottom(2000, 600))
            .await?;
        if !advanced {
            break;
        }
        snapshot = wait_until_settled(&handle).await?;
        fetched_pages += 1;
    }

    print_results(&snapshot);
    handle.shutdown().await?;
    Ok(())
}

/// Show discovery results for a randomly drawn keyword.
async fn discover(
    media_type: Option<MediaTypeFilter>,
    year: Option<String>,
) -> anyhow::Result<()> {
    let handle = spawn_controller()?;

    apply_filters(&handle, media_type, year).await?;

    let snapshot = wait_until_settled(&handle).await?;
    print_results(&snapshot);
    handle.shutdown().await?;
    Ok(())
}

/// Spawn the query controller over an OMDb client keyed from the
/// environment. One-shot invocations have no keystroke stream to
/// coalesce, so the debounce delay is zeroed.
fn spawn_controller() -> anyhow::Result<QueryControllerHandle> {
    let mut config = MarqueeConfig::default();
    config.search.debounce_delay = Duration::ZERO;

    let client =
        OmdbClient::from_env(&config.network).context("could not create the OMDb client")?;
    Ok(spawn_query_controller(config, Arc::new(client)))
}

async fn apply_filters(
    handle: &QueryControllerHandle,
    media_type: Option<MediaTypeFilter>,
    year: Option<String>,
) -> anyhow::Result<()> {
    if media_type.is_some() {
        handle.set_media_type(media_type).await?;
    }
    if let Some(year) = year {
        let probe = SearchFilters {
            media_type: None,
            year: Some(year.clone()),
        };
        if probe.effective_year().is_none() {
            tracing::warn!(year, "year is not a 4-digit value and will be ignored");
        }
        handle.set_year(Some(year)).await?;
    }
    Ok(())
}

/// Polls the controller until no fetch is outstanding.
async fn wait_until_settled(handle: &QueryControllerHandle) -> anyhow::Result<SearchSnapshot> {
    for _ in 0..400 {
        let snapshot = handle.snapshot().await?;
        if snapshot.is_settled() {
            return Ok(snapshot);
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    bail!("timed out waiting for the search to settle");
}

fn print_results(snapshot: &SearchSnapshot) {
    if let Some(error) = &snapshot.error {
        println!("Error: {error}");
        return;
    }

    println!(
        "Results - page {} of {} ({} shown)",
        snapshot.page,
        snapshot.total_pages,
        snapshot.results.len()
    );
    println!("{:-<72}", "");

    for movie in &snapshot.results {
        println!(
            "{:<11} {:<9} {:<8} {}",
            movie.id, movie.year, movie.media_type, movie.title
        );
        println!("            poster: {}", movie.display_poster());
    }

    println!("{:-<72}", "");
}
