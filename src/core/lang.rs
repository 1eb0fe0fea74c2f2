//! Localized messages for the leaderboard tab.
//!
//! Built-in English messages are loaded from `config/lang/en.json` (embedded at
//! compile time). A locale can be overridden per key with
//! `~/.config/update-leaderboard/lang/<locale>.json`.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use crate::core::paths;

/// Message keys used by the leaderboard.
pub mod keys {
    pub const BUTTON_TEXT: &str = "ButtonText";
    pub const HEADER_TEXT: &str = "HeaderText";
    pub const TITLE_LINE_1: &str = "TitleLine1";
    /// Contains one `{0}` placeholder for the grand total.
    pub const TITLE_LINE_2: &str = "TitleLine2";
}

pub const DEFAULT_LOCALE: &str = "en";

#[derive(Debug, thiserror::Error)]
pub enum LangError {
    #[error("Failed to read language file: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid language file: {0}")]
    Json(#[from] serde_json::Error),
}

fn load_builtin_messages() -> HashMap<String, String> {
    let json = include_str!("../../config/lang/en.json");
    serde_json::from_str(json).expect("en.json must be valid")
}

static BUILTIN_MESSAGES: OnceLock<HashMap<String, String>> = OnceLock::new();

/// Built-in English messages, loaded on first access.
pub fn builtin_messages() -> &'static HashMap<String, String> {
    BUILTIN_MESSAGES.get_or_init(load_builtin_messages)
}

/// Key to message lookup for one locale.
#[derive(Clone, Debug, Default)]
pub struct Lang {
    locale: String,
    overrides: HashMap<String, String>,
}

impl Lang {
    /// Built-in messages only.
    pub fn builtin(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            overrides: HashMap::new(),
        }
    }

    /// Messages for `locale`, with the override file from the config directory
    /// when there is one. A broken override file is logged and ignored.
    pub fn load(locale: &str) -> Self {
        let Some(dir) = paths::lang_dir() else {
            return Self::builtin(locale);
        };
        match Self::load_from_dir(&dir, locale) {
            Ok(lang) => lang,
            Err(e) => {
                log::warn!("Ignoring {} messages: {}", locale, e);
                Self::builtin(locale)
            }
        }
    }

    /// Messages for `locale` with overrides read from `<dir>/<locale>.json`.
    /// A missing file is not an error.
    pub fn load_from_dir(dir: &Path, locale: &str) -> Result<Self, LangError> {
        let path = dir.join(format!("{}.json", locale));
        let overrides = match fs::read_to_string(&path) {
            Ok(raw) => {
                log::debug!("Loaded message overrides from {}", path.display());
                serde_json::from_str(&raw)?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            locale: locale.to_string(),
            overrides,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Message for `key`: override, then built-in, then the key itself.
    pub fn get(&self, key: &str) -> String {
        self.overrides
            .get(key)
            .or_else(|| builtin_messages().get(key))
            .cloned()
            .unwrap_or_else(|| {
                log::warn!("No message for key {} ({})", key, self.locale);
                key.to_string()
            })
    }
}

/// Replace `{0}`, `{1}`, ... in `template` with `args`.
pub fn fill(template: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |out, (i, arg)| {
            out.replace(&format!("{{{}}}", i), arg)
        })
}
