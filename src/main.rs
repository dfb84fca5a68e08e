//! Demo entry point for the score-room rating engine
//!
//! Seeds an in-memory store with a demo content, processes a sample match,
//! and prints the resulting record and leaderboard. Useful for smoke-testing
//! configuration and observing the pipeline end to end.

use anyhow::Result;
use clap::Parser;
use score_room::config::AppConfig;
use score_room::types::Content;
use score_room::{InMemoryRatingStore, MatchProcessor, RatingStore};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Score Room - rating and ranking engine for scored multi-participant matches
#[derive(Parser)]
#[command(name = "score-room", version, about)]
struct Args {
    /// Override log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Validate configuration and exit without running the demo
    #[arg(long)]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

async fn run_demo(config: &AppConfig) -> Result<()> {
    let store = Arc::new(InMemoryRatingStore::new());

    let content = Content {
        id: "demo".to_string(),
        name: "Demo content".to_string(),
        default_rating: config.content_defaults.default_rating,
        slope: config.content_defaults.slope,
        temperature: config.content_defaults.temperature,
    };
    store.put_content(content).await?;

    let processor = MatchProcessor::new(store);

    let scores: HashMap<String, f64> = [
        ("alice".to_string(), 100.0),
        ("bob".to_string(), 85.0),
        ("carol".to_string(), 85.0),
        ("dave".to_string(), 70.0),
    ]
    .into_iter()
    .collect();

    let record = processor
        .process_match(Some("erin".to_string()), scores, "demo")
        .await?;

    info!("Match {} processed", record.id);
    for result in &record.participants {
        info!(
            "  #{} {} score={} rating {} -> {}",
            result.ranking,
            result.participant_id,
            result.score,
            result.pre_rating,
            result.post_rating
        );
    }

    let leaderboard = processor
        .leaderboard("demo", Some(config.service.max_listing_entries))
        .await?;
    info!("Leaderboard:");
    for (player_id, rating) in leaderboard {
        info!("  {} {:.2}", player_id, rating);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Some(log_level) = args.log_level {
        config.service.log_level = log_level;
    }

    init_logging(&config.service.log_level)?;

    if args.dry_run {
        info!("Configuration validation successful");
        return Ok(());
    }

    info!(
        "{} v{} starting (slope={}, temperature={})",
        config.service.name,
        score_room::VERSION,
        config.content_defaults.slope,
        config.content_defaults.temperature
    );

    run_demo(&config).await
}
