//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for pitchpoll
#[derive(Parser, Debug)]
#[command(name = "pitchpoll")]
#[command(author, version, about = "Timed yes/no voting on a stock pitch")]
#[command(long_about = r#"
Pitchpoll runs a timed yes/no poll over a trade proposal (ticker, direction,
share count). The operator starts a vote from the interactive console, a
short countdown synchronizes everyone's display, the voting window opens,
and results are tallied when it closes.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./pitchpoll.toml    Project-level config
3. ~/.config/pitchpoll/config.toml   Global config

Example:
  pitchpoll
  pitchpoll --store votes.jsonl
  pitchpoll --config demo.toml -vv
"#)]
pub struct Cli {
    /// Path to the JSONL ballot log (overrides the config file; votes are
    /// kept in memory when neither is set)
    #[arg(short, long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the welcome banner
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
