// Art explorer command-line driver
//
// Runs one exploration against the Met Museum collection and prints the
// settled result set as JSON lines on stdout.
//
// Usage: kodegen-artexplorer <query> [min_year] [max_year]

use anyhow::{Context, Result, bail};
use kodegen_tools_artexplorer::utils::{MAX_YEAR, MIN_YEAR};
use kodegen_tools_artexplorer::{ExplorerConfig, QueryOrchestrator, UserNotice};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
                .add_directive("hyper_util=warn".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(text) = args.next() else {
        bail!("usage: kodegen-artexplorer <query> [min_year] [max_year]");
    };
    let min_year = parse_year(args.next(), MIN_YEAR).context("invalid min_year")?;
    let max_year = parse_year(args.next(), MAX_YEAR).context("invalid max_year")?;

    let config = ExplorerConfig::builder().request_timeout_secs(Some(30)).build()?;
    let orchestrator = QueryOrchestrator::from_config(config)?;

    // Progress on stderr while details stream in
    let mut updates = orchestrator.subscribe();
    let progress = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            if snapshot.is_in_flight() {
                tracing::debug!(artworks = snapshot.artworks.len(), "Results updated");
            }
        }
    });

    let report = orchestrator.explore(text.as_str(), min_year, max_year).await?;
    progress.abort();

    let snapshot = orchestrator.snapshot();
    let mut stdout = std::io::stdout().lock();
    for artwork in &snapshot.artworks {
        serde_json::to_writer(&mut stdout, artwork)?;
        writeln!(stdout)?;
    }

    if snapshot.notice != UserNotice::None {
        eprintln!("{}", snapshot.notice.message());
    }
    tracing::info!(
        merged = report.merged,
        skipped = report.skipped,
        failed = report.failed,
        "Done"
    );
    Ok(())
}

fn parse_year(arg: Option<String>, default: i32) -> Result<i32> {
    match arg {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("'{raw}' is not a year")),
        None => Ok(default),
    }
}
