//! LotteryDraw - Main Entry Point
//!
//! Loads strategies from configuration and runs a batch of draws against
//! one of them, printing how often each award came up.

use anyhow::{bail, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lottery_draw::config::load_config;
use lottery_draw::{
    AlgorithmRegistry, DrawExec, DrawExecutor, DrawRequest, InMemoryStrategyRepository,
    StrategyId,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides `settings.log_level`
    #[arg(long)]
    log_level: Option<String>,

    /// Strategy to draw from
    #[arg(short, long, env = "LOTTERY_STRATEGY_ID")]
    strategy_id: StrategyId,

    /// User the draws are made for
    #[arg(short, long, default_value = "cli-user")]
    user_id: String,

    /// Number of draws to run
    #[arg(short, long, default_value_t = 1)]
    draws: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let config = load_config(Some(&args.config))?;

    // Initialize logging
    let level = parse_level(args.log_level.as_deref().unwrap_or(&config.settings.log_level));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting LotteryDraw");
    info!("Configuration file: {}", args.config);

    if config.strategy(args.strategy_id).is_none() {
        bail!("strategy {} is not configured", args.strategy_id);
    }

    let registry = Arc::new(AlgorithmRegistry::from_settings(&config.engine));
    let repository = Arc::new(InMemoryStrategyRepository::from_configs(&config.strategies));
    let executor = DrawExecutor::new(registry, repository);

    let mut hits: BTreeMap<String, u32> = BTreeMap::new();
    let mut misses = 0u32;
    for _ in 0..args.draws {
        let result = executor
            .do_draw_exec(DrawRequest::new(args.user_id.clone(), args.strategy_id))
            .await?;
        match result.award_id {
            Some(award_id) => *hits.entry(award_id).or_default() += 1,
            None => misses += 1,
        }
    }

    println!("strategy {} - {} draws", args.strategy_id, args.draws);
    for (award_id, count) in &hits {
        println!(
            "  {:<16} {:>8} ({:.2}%)",
            award_id,
            count,
            percent(*count, args.draws)
        );
    }
    println!(
        "  {:<16} {:>8} ({:.2}%)",
        "no win",
        misses,
        percent(misses, args.draws)
    );

    Ok(())
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn percent(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_log_level_falls_back_to_config() {
        let config = lottery_draw::config::parse_config(
            r#"
            [settings]
            log_level = "debug"
            "#,
        )
        .unwrap();

        let args = Args::parse_from(["lottery_draw", "--strategy-id", "1"]);
        let level = parse_level(args.log_level.as_deref().unwrap_or(&config.settings.log_level));
        assert_eq!(level, Level::DEBUG);

        let args = Args::parse_from(["lottery_draw", "--strategy-id", "1", "--log-level", "error"]);
        let level = parse_level(args.log_level.as_deref().unwrap_or(&config.settings.log_level));
        assert_eq!(level, Level::ERROR);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(30, 100), 30.0);
    }
}
