//! SocialGraph CLI
//!
//! Replays a scenario into a fresh graph, logs its popularity ranking and
//! writes the node/edge export as JSON.
//!
//! # Environment
//!
//! - `SCENARIO_PATH` - TOML scenario (bundled demo when unset)
//! - `EXPORT_PATH` - output file (stdout when unset)
//! - `EXPORT_PRETTY`, `EXPORT_USER_WEIGHT_BASE`, `RANKING_TOP_N`
//! - `RUST_LOG` - log filter

use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use socialgraph::metrics::{GraphStats, PerformanceTimer};
use socialgraph::{Config, ExportOptions, GraphExport, PopularityReport, Scenario};

fn main() -> Result<()> {
    init_tracing();

    info!("🚀 SocialGraph v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("failed to load configuration")?;

    let scenario = match &config.scenario.path {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Scenario::demo().context("bundled demo scenario is invalid")?,
    };

    let built = scenario.build().context("failed to replay scenario")?;
    let graph = built.graph;
    graph
        .verify_invariants()
        .context("graph invariants broken after replay")?;

    let stats = GraphStats::collect(&graph);
    info!(
        users = stats.users,
        posts = stats.posts,
        comments = stats.comments,
        views = stats.views,
        follows = stats.follows,
        "✅ Graph built"
    );

    let report = PopularityReport::build(&graph, Some(config.ranking.top_n))?;
    info!("📊 Most followed users:");
    for row in &report.top_users {
        info!("  #{} {} ({} followers)", row.rank, row.username, row.follower_count);
    }
    info!("📊 Most viewed posts:");
    for row in &report.top_posts {
        info!("  #{} {}: {:?} ({} views)", row.rank, row.author, row.content, row.view_count);
    }

    let timer = PerformanceTimer::new("export");
    let options: ExportOptions = config.export.options();
    let export = GraphExport::from_graph(&graph, &options)?;
    match &config.export.output_path {
        Some(path) => export.write_to(path, config.export.pretty)?,
        None => {
            let json = export.to_json(config.export.pretty)?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).context("failed to write export to stdout")?;
        }
    }
    timer.log_if_slow(500);

    Ok(())
}

/// Initialize structured logging with tracing; logs go to stderr so stdout stays clean JSON
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("socialgraph=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(std::env::var("NO_COLOR").is_err()),
        )
        .init();
}
