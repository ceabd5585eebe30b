use anyhow::{Context, Result};
use app::Duel;
use chess_core::engine::config::EngineConfig;
use chess_core::logic::game::GameState;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod app;

/// Play capture-the-king chess in the terminal against the engine.
#[derive(Debug, Parser)]
#[command(name = "chess_duel", version, about)]
struct Cli {
    /// Engine config as JSON; fields left out keep their defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Search depth in plies (at least 1), overriding the config file
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..))]
    depth: Option<u8>,

    /// Pause before each engine reply, in milliseconds
    #[arg(long, default_value_t = 500)]
    pace_ms: u64,

    /// Start from this FEN placement instead of the standard setup
    #[arg(long)]
    fen: Option<String>,
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            EngineConfig::load_from_json(&json)
                .with_context(|| format!("invalid engine config in {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(depth) = cli.depth {
        config.search_depth = depth;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    log::debug!("Engine config: {config:?}");

    let game = match &cli.fen {
        Some(fen) => GameState::from_fen(fen).map_err(anyhow::Error::msg)?,
        None => GameState::new(),
    };

    let mut duel = Duel::new(game, config, Duration::from_millis(cli.pace_ms));
    duel.run(io::stdin().lock(), &mut io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_flag_must_be_positive() -> Result<()> {
        assert!(Cli::try_parse_from(["chess_duel", "--depth", "0"]).is_err());
        assert!(Cli::try_parse_from(["chess_duel", "-d", "256"]).is_err());

        let cli = Cli::try_parse_from(["chess_duel", "--depth", "2"])?;
        assert_eq!(load_config(&cli)?.search_depth, 2);
        Ok(())
    }

    #[test]
    fn test_zero_depth_config_file_is_rejected() -> Result<()> {
        let path = std::env::temp_dir().join(format!("chess_duel_depth_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "search_depth": 0 }"#)?;
        let arg = path.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["chess_duel", "--config", arg.as_str()])?;
        let result = load_config(&cli);
        std::fs::remove_file(&path)?;

        let err = result.err().context("zero depth accepted")?;
        assert!(format!("{err:#}").contains("search_depth must be at least 1"));
        Ok(())
    }
}
