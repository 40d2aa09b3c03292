//! Command-line interface for the terminal host.

use clap::Parser;
use std::path::PathBuf;
use tictac_canvas::Player;

/// TicTacToe (aka Naughts & Crosses) on a mouse-driven terminal canvas
#[derive(Parser, Debug)]
#[command(name = "tictac_canvas")]
#[command(about = "Click cells to place marks; pick the team with x / o", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "tictac_canvas.toml")]
    pub config: PathBuf,

    /// Team selected at startup (x or o), overriding the config file
    #[arg(short, long)]
    pub player: Option<Player>,

    /// Log file path, overriding the config file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
