//! Runtime configuration: file locations, locale, admins and hook commands.
//!
//! Values come from the environment (a `.env` file is loaded first by `main`)
//! and can be overridden by command-line flags.

use std::env;
use std::path::PathBuf;

use crate::core::hooks::Hooks;
use crate::core::lang::DEFAULT_LOCALE;
use crate::core::permissions::Admins;

pub const DEFAULT_SERVER_INFO_PATH: &str = "oxide/config/ServerInfo.json";
pub const DEFAULT_SUMMARY_PATH: &str = "oxide/data/DepositBox/DepositBoxSummary.json";

pub const ENV_SERVER_INFO: &str = "LEADERBOARD_SERVER_INFO";
pub const ENV_SUMMARY: &str = "LEADERBOARD_SUMMARY";
pub const ENV_PLAYERS: &str = "LEADERBOARD_PLAYERS";
pub const ENV_LOCALE: &str = "LEADERBOARD_LOCALE";
pub const ENV_ADMINS: &str = "LEADERBOARD_ADMINS";
pub const ENV_REGENERATE_CMD: &str = "LEADERBOARD_REGENERATE_CMD";
pub const ENV_RELOAD_CMD: &str = "LEADERBOARD_RELOAD_CMD";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_info_path: PathBuf,
    pub summary_path: PathBuf,
    /// Optional player id -> name file.
    pub players_path: Option<PathBuf>,
    pub locale: String,
    pub admins: Admins,
    pub hooks: Hooks,
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub server_info: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub players: Option<PathBuf>,
    pub locale: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid locale {0:?}: expected letters, digits, '-' or '_'")]
    InvalidLocale(String),
}

/// Load configuration from the process environment.
pub fn load(overrides: Overrides) -> Result<Config, ConfigError> {
    from_lookup(|key| env::var(key).ok(), overrides)
}

/// Build configuration from any key lookup. Empty values count as unset.
pub fn from_lookup<F>(lookup: F, overrides: Overrides) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let server_info_path = overrides
        .server_info
        .or_else(|| get(ENV_SERVER_INFO).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVER_INFO_PATH));
    let summary_path = overrides
        .summary
        .or_else(|| get(ENV_SUMMARY).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SUMMARY_PATH));
    let players_path = overrides
        .players
        .or_else(|| get(ENV_PLAYERS).map(PathBuf::from));

    let locale = overrides
        .locale
        .or_else(|| get(ENV_LOCALE))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    // The locale names a file under the config dir.
    if locale.is_empty()
        || !locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::InvalidLocale(locale));
    }

    let admins = get(ENV_ADMINS)
        .map(|list| Admins::parse(&list))
        .unwrap_or_default();
    let hooks = Hooks {
        regenerate: get(ENV_REGENERATE_CMD),
        reload: get(ENV_RELOAD_CMD),
    };

    Ok(Config {
        server_info_path,
        summary_path,
        players_path,
        locale,
        admins,
        hooks,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::core::permissions::Caller;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = from_lookup(env_of(&[]), Overrides::default()).unwrap();
        assert_eq!(
            config.server_info_path,
            PathBuf::from(DEFAULT_SERVER_INFO_PATH)
        );
        assert_eq!(config.summary_path, PathBuf::from(DEFAULT_SUMMARY_PATH));
        assert_eq!(config.players_path, None);
        assert_eq!(config.locale, "en");
        assert_eq!(config.hooks, Hooks::default());
    }

    #[test]
    fn environment_is_read() {
        let config = from_lookup(
            env_of(&[
                (ENV_SERVER_INFO, "/srv/ServerInfo.json"),
                (ENV_PLAYERS, "players.json"),
                (ENV_LOCALE, "fr"),
                (ENV_ADMINS, "765,123"),
                (ENV_RELOAD_CMD, "rcon oxide.reload ServerInfo"),
                (ENV_REGENERATE_CMD, "   "),
            ]),
            Overrides::default(),
        )
        .unwrap();
        assert_eq!(config.server_info_path, PathBuf::from("/srv/ServerInfo.json"));
        assert_eq!(config.players_path, Some(PathBuf::from("players.json")));
        assert_eq!(config.locale, "fr");
        assert!(config.admins.is_admin(&Caller::Player("123".to_string())));
        assert_eq!(
            config.hooks.reload.as_deref(),
            Some("rcon oxide.reload ServerInfo")
        );
        assert_eq!(config.hooks.regenerate, None);
    }

    #[test]
    fn overrides_win_over_environment() {
        let config = from_lookup(
            env_of(&[(ENV_SUMMARY, "env.json"), (ENV_LOCALE, "fr")]),
            Overrides {
                summary: Some(PathBuf::from("flag.json")),
                locale: Some("de".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(config.summary_path, PathBuf::from("flag.json"));
        assert_eq!(config.locale, "de");
    }

    #[test]
    fn locale_with_path_separators_is_rejected() {
        let err = from_lookup(
            env_of(&[]),
            Overrides {
                locale: Some("../secrets".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLocale(_)));
    }
}
