//! Player display names, read from an optional `{ "<player id>": "<name>" }` file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::error::LeaderboardError;

/// Known player names. Unknown ids resolve to `None`.
#[derive(Clone, Debug, Default)]
pub struct PlayerDirectory {
    names: HashMap<String, String>,
}

impl PlayerDirectory {
    /// Load names from `path`. A missing file gives an empty directory, so
    /// every player is shown by id.
    pub fn load(path: &Path) -> Result<Self, LeaderboardError> {
        if !path.exists() {
            log::warn!(
                "Player names file {} not found, showing player ids",
                path.display()
            );
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let names: HashMap<String, String> = serde_json::from_str(&raw).map_err(|e| {
            LeaderboardError::MalformedDocument(format!(
                "{} must map player ids to names: {}",
                path.display(),
                e
            ))
        })?;
        log::debug!("Loaded {} player name(s)", names.len());
        Ok(Self { names })
    }

    pub fn resolve(&self, player_id: &str) -> Option<String> {
        self.names
            .get(player_id)
            .filter(|name| !name.trim().is_empty())
            .cloned()
    }
}

impl FromIterator<(String, String)> for PlayerDirectory {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
