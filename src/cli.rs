//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

use crate::core::config::Overrides;

const AFTER_HELP: &str = "\
EXAMPLES:
  update-leaderboard                          Rebuild the Leaderboard tab as the console
  update-leaderboard --caller 7656119...      Rebuild on behalf of a player (must be an admin)
  update-leaderboard preview                  Print the leaderboard without writing anything
  update-leaderboard --summary s.json preview Preview from another summary file
  update-leaderboard paths                    Show resolved files and hooks
  update-leaderboard completions bash         Generate bash completions

ENVIRONMENT:
  LEADERBOARD_SERVER_INFO, LEADERBOARD_SUMMARY, LEADERBOARD_PLAYERS,
  LEADERBOARD_LOCALE, LEADERBOARD_ADMINS, LEADERBOARD_REGENERATE_CMD,
  LEADERBOARD_RELOAD_CMD (a .env file in the working directory is read too)
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Rebuild the Leaderboard tab of ServerInfo.json from the DepositBox summary",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to ServerInfo.json
    #[arg(long, global = true, value_name = "PATH")]
    pub server_info: Option<PathBuf>,

    /// Path to DepositBoxSummary.json
    #[arg(long, global = true, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// JSON file mapping player ids to display names
    #[arg(long, global = true, value_name = "PATH")]
    pub players: Option<PathBuf>,

    /// Locale of the tab messages (e.g. en, fr)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Player id the command runs for; omit to run as the console
    #[arg(long, global = true, value_name = "PLAYER_ID")]
    pub caller: Option<String>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the Leaderboard tab (default)
    Update,
    /// Print the leaderboard pages without changing any file
    Preview,
    /// Show resolved file paths, locale, admins and hooks
    Paths,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// Flags that override environment configuration.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            server_info: self.server_info.clone(),
            summary: self.summary.clone(),
            players: self.players.clone(),
            locale: self.locale.clone(),
        }
    }
}
