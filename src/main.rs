use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use trap_connect_four::ai::TrapAgent;
use trap_connect_four::config::EngineConfig;

/// Pick the next column for a Connect Four position.
#[derive(Parser)]
#[command(name = "trap-connect-four", about = "Choose a Connect Four move")]
struct Cli {
    /// Board encoding: rows top first, separated by ';', cells by ','
    #[arg(long)]
    board: String,

    /// Path to TOML configuration file
    #[arg(long, default_value = "trap.toml")]
    config: PathBuf,

    /// Override the side to play (1 or 2)
    #[arg(long)]
    player: Option<u8>,

    /// Override the number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override the number of columns
    #[arg(long)]
    columns: Option<usize>,

    /// Print the full decision as JSON instead of the bare column
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(player) = cli.player {
        config.bot.player_id = player;
    }
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(columns) = cli.columns {
        config.board.columns = columns;
    }

    let agent = TrapAgent::from_config(&config).context("invalid configuration")?;
    let decision = agent
        .decide_encoded(&cli.board)
        .context("choosing a column")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string(&decision).context("serializing decision")?
        );
    } else {
        println!("{}", decision.column);
    }
    Ok(())
}
