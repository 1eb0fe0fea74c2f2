//! Errors raised while rebuilding the leaderboard tab.

use std::io;
use std::path::PathBuf;

/// Everything that can stop a leaderboard update. Nothing is written to disk
/// once one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    /// A required input file does not exist.
    #[error("{what} not found at {}", .path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    /// A document exists but does not have the expected shape.
    #[error("{0}")]
    MalformedDocument(String),

    /// A deposit value could not be used as a non-negative integer.
    #[error("{0}")]
    Computation(String),

    #[error("You must be an admin to use this command.")]
    PermissionDenied,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl LeaderboardError {
    /// Short text shown to the invoking caller.
    pub fn reply(&self) -> String {
        match self {
            LeaderboardError::PermissionDenied => self.to_string(),
            LeaderboardError::MissingInput { path, .. } => {
                let file = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("❌ {} not found.", file)
            }
            _ => format!("❌ Error: {}", self),
        }
    }
}
