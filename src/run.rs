//! Application run modes: logger init, update, preview, paths.

use crate::cli::Args;
use crate::core::app;
use crate::core::command::{SUCCESS_REPLY, UpdateLeaderboard};
use crate::core::config::Config;
use crate::core::error::LeaderboardError;
use crate::core::lang::Lang;
use crate::core::leaderboard::LINES_PER_PAGE;
use crate::core::paths;
use crate::core::permissions::Caller;
use crate::core::players::PlayerDirectory;
use crate::core::server_info::FileConfigStore;
use crate::core::summary::FileSummaryStore;

/// Initialize env_logger on stderr. `RUST_LOG` takes precedence over -v/-q.
pub fn init_logger(args: &Args) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level()),
    )
    .try_init();
}

/// File-backed collaborators of the command.
struct Stores {
    summary: FileSummaryStore,
    server_info: FileConfigStore,
    players: PlayerDirectory,
    lang: Lang,
}

impl Stores {
    fn open(config: &Config) -> Result<Self, LeaderboardError> {
        let players = match &config.players_path {
            Some(path) => PlayerDirectory::load(path)?,
            None => PlayerDirectory::default(),
        };
        Ok(Self {
            summary: FileSummaryStore::new(&config.summary_path),
            server_info: FileConfigStore::new(&config.server_info_path),
            players,
            lang: Lang::load(&config.locale),
        })
    }

    fn command<'a>(
        &'a self,
        config: &'a Config,
    ) -> UpdateLeaderboard<'a, FileSummaryStore, FileConfigStore> {
        UpdateLeaderboard {
            summary: &self.summary,
            server_info: &self.server_info,
            players: &self.players,
            lang: &self.lang,
            admins: &config.admins,
            hooks: &config.hooks,
        }
    }
}

/// Report an error at the command boundary: log it and tell the caller.
fn report(err: LeaderboardError) -> LeaderboardError {
    log::error!("Error updating leaderboard: {}", err);
    eprintln!("{}", err.reply());
    err
}

/// Run the update command and print the reply.
pub fn run_update(args: &Args, config: &Config) -> Result<(), LeaderboardError> {
    let caller = Caller::from_arg(args.caller.as_deref());
    let stores = Stores::open(config).map_err(report)?;
    let outcome = stores.command(config).run(&caller).map_err(report)?;
    log::info!(
        "Leaderboard has {} player(s); ServerInfo now has {} tab(s)",
        outcome.ranked,
        outcome.tabs
    );
    println!("{}", SUCCESS_REPLY);
    Ok(())
}

/// Print the leaderboard pages to stdout without writing anything.
pub fn run_preview(config: &Config) -> Result<(), LeaderboardError> {
    let stores = Stores::open(config).map_err(report)?;
    let tab = stores.command(config).preview().map_err(report)?;

    println!(
        "[{}] {} ({})",
        tab.button_text,
        tab.header_text,
        stores.lang.locale()
    );
    for (i, page) in tab.pages.iter().enumerate() {
        println!(
            "--- page {} ({}/{} lines) ---",
            i + 1,
            page.text_lines.len(),
            LINES_PER_PAGE
        );
        for line in &page.text_lines {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Shown by `paths` for settings that have no value.
const UNSET: &str = "(unset)";

/// Print resolved paths and settings.
pub fn run_paths(config: &Config) {
    let show = |v: Option<&str>| v.unwrap_or(UNSET).to_string();
    let lang_dir = paths::lang_dir().map(|p| p.display().to_string());

    println!("{} {}", app::NAME, app::VERSION);
    println!("ServerInfo:   {}", config.server_info_path.display());
    println!("Summary:      {}", config.summary_path.display());
    println!(
        "Players:      {}",
        show(config.players_path.as_ref().map(|p| p.display().to_string()).as_deref())
    );
    println!("Locale:       {}", config.locale);
    println!("Lang dir:     {}", show(lang_dir.as_deref()));
    if config.admins.is_empty() {
        println!("Admins:       console only");
    } else {
        println!("Admins:       console + {} player(s)", config.admins.len());
    }
    println!("Regenerate:   {}", show(config.hooks.regenerate.as_deref()));
    println!("Reload:       {}", show(config.hooks.reload.as_deref()));
}
