pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "arcade")]
#[command(about = "Console exercises: battle, ATM, donations, number guessing and hangman")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Seed for every random choice, overriding `general.seed`
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Replay input lines from a file instead of reading stdin
    #[arg(long, global = true)]
    pub script: Option<String>,

    /// Write session reports to `export.output_path` on exit
    #[arg(long, global = true)]
    pub export: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// The Menace of Mordor: pick a hero and fight the villain
    Battle,
    /// Automated teller machine simulator
    Atm,
    /// DonateMe donations desk
    Donations,
    /// Number guessing with linear and binary search demos
    Guessing,
    /// Hangman with standard, timed and speech modes
    Hangman,
    /// Print the effective configuration as TOML
    ShowConfig,
}
