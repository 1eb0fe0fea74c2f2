//! # update-leaderboard
//!
//! Rebuilds the "Leaderboard" tab of a ServerInfo.json document from the
//! per-player deposit summary, then triggers a ServerInfo reload.

mod cli;
mod core;
mod run;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands};

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    if let Some(Commands::Completions { shell }) = &args.command {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        cli::generate(*shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let config = core::config::load(args.overrides()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let result = match &args.command {
        None | Some(Commands::Update) => run::run_update(&args, &config),
        Some(Commands::Preview) => run::run_preview(&config),
        Some(Commands::Paths) => {
            run::run_paths(&config);
            Ok(())
        }
        Some(Commands::Completions { .. }) => Ok(()),
    };

    if result.is_err() {
        std::process::exit(1);
    }
}
