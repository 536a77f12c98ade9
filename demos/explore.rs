//! Exploration walkthrough
//!
//! Runs an exploration, supersedes it with a second query halfway through,
//! then prints what the result grid would show.
//!
//! Usage: cargo run --example explore -- [first query] [second query]

use kodegen_tools_artexplorer::{ExplorerConfig, ImageCache, QueryOrchestrator, SearchQuery};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("hyper_util", log::LevelFilter::Warn)
        .filter_module("reqwest", log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let first = args.get(1).map_or("sunflowers", String::as_str);
    let second = args.get(2).map_or("cats", String::as_str);

    let config = ExplorerConfig::builder().request_timeout_secs(Some(30)).build()?;
    let images = ImageCache::new(&config)?;
    let orchestrator = QueryOrchestrator::from_config(config)?;

    log::info!("Exploring '{first}' across the whole collection");
    let superseded = orchestrator.spawn_explore(first.to_string(), -2000, 2000);
    tokio::time::sleep(Duration::from_millis(300)).await;

    let query = SearchQuery::around(second, 1850, 50, orchestrator.config().year_bounds())?;
    log::info!(
        "Superseding with '{second}' in {}..={}",
        query.min_year(),
        query.max_year()
    );
    let report = orchestrator.explore_query(query).await?;

    match superseded.await? {
        Ok(first_report) => log::info!("First exploration ended as {:?}", first_report.outcome),
        Err(e) => log::info!("First exploration ended early: {e}"),
    }
    log::info!(
        "Second exploration: {} candidates, {} merged, {} skipped, {} failed, {:?}",
        report.candidates,
        report.merged,
        report.skipped,
        report.failed,
        report.outcome
    );

    let snapshot = orchestrator.snapshot();
    if !snapshot.notice.message().is_empty() {
        log::info!("{}", snapshot.notice.message());
    }
    for artwork in &snapshot.artworks {
        println!("{:>6}  {}  {}", artwork.year, artwork.title, artwork.link);
    }

    // Warm the image cache with the first thumbnail
    if let Some(url) = snapshot.artworks.iter().find_map(|a| a.image_url.as_ref()) {
        let body = images.fetch(url).await?;
        log::info!("Fetched {} image bytes from {url}", body.len());
    }

    let metrics = orchestrator.source().metrics();
    log::info!(
        "Client: {} searches, {} detail requests, {:.0}% cache hits",
        metrics.search_requests,
        metrics.detail_requests,
        metrics.cache_hit_rate() * 100.0
    );
    Ok(())
}
