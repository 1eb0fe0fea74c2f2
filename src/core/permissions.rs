//! Admin-only gate for the update command.

use std::collections::HashSet;

/// Who invoked the command. The local console has no player id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Caller {
    Console,
    Player(String),
}

impl Caller {
    pub fn from_arg(id: Option<&str>) -> Self {
        match id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => Caller::Player(id.to_string()),
            None => Caller::Console,
        }
    }
}

impl std::fmt::Display for Caller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Caller::Console => write!(f, "console"),
            Caller::Player(id) => write!(f, "player {}", id),
        }
    }
}

/// Set of player ids allowed to run admin commands.
#[derive(Clone, Debug, Default)]
pub struct Admins {
    ids: HashSet<String>,
}

impl Admins {
    /// Parse a comma separated id list; blanks are skipped.
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The console is always an admin.
    pub fn is_admin(&self, caller: &Caller) -> bool {
        match caller {
            Caller::Console => true,
            Caller::Player(id) => self.ids.contains(id),
        }
    }
}

impl FromIterator<String> for Admins {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
