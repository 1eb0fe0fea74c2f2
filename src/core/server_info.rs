//! `ServerInfo.json` and its file-backed store.
//!
//! Only `settings.Tabs` is looked at, and of each tab only `ButtonText`.
//! Everything else is carried through as raw JSON, in its original key order.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::error::LeaderboardError;

const BUTTON_TEXT: &str = "ButtonText";

/// One page of a generated tab: text lines plus image settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Page {
    pub text_lines: Vec<String>,
    pub image_settings: Vec<Value>,
}

impl Page {
    pub fn with_lines(text_lines: Vec<String>) -> Self {
        Self {
            text_lines,
            ..Self::default()
        }
    }
}

/// Anchor and font settings of a generated tab. Opaque to this tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TabLayout {
    pub tab_button_anchor: i64,
    pub tab_button_font_size: i64,
    pub header_anchor: i64,
    pub header_font_size: i64,
    pub text_font_size: i64,
    pub text_anchor: i64,
    pub oxide_group: String,
}

impl TabLayout {
    /// Layout used by the leaderboard tab.
    pub const LEADERBOARD: TabLayout = TabLayout {
        tab_button_anchor: 4,
        tab_button_font_size: 16,
        header_anchor: 0,
        header_font_size: 32,
        text_font_size: 16,
        text_anchor: 3,
        oxide_group: String::new(),
    };
}

/// A tab built by this tool, before it is spliced into the document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TabFragment {
    pub button_text: String,
    pub header_text: String,
    pub pages: Vec<Page>,
    #[serde(flatten)]
    pub layout: TabLayout,
}

/// A tab as stored in `settings.Tabs`: a JSON object with a string
/// `ButtonText`, the key tabs are replaced by.
#[derive(Clone, Debug, PartialEq)]
pub struct Tab {
    fields: Map<String, Value>,
}

impl Tab {
    /// `None` unless `value` is an object with a string `ButtonText`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) if fields.get(BUTTON_TEXT).is_some_and(Value::is_string) => {
                Some(Self { fields })
            }
            _ => None,
        }
    }

    pub fn from_fragment(fragment: &TabFragment) -> Result<Self, LeaderboardError> {
        Self::from_value(serde_json::to_value(fragment)?).ok_or_else(|| {
            LeaderboardError::MalformedDocument(format!(
                "tab {:?} did not serialize to an object",
                fragment.button_text
            ))
        })
    }

    pub fn button_text(&self) -> &str {
        self.fields
            .get(BUTTON_TEXT)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// The whole `ServerInfo.json` document.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerInfo {
    /// The parsed document. `settings.Tabs` keeps its key position but its
    /// content lives in `tabs`.
    document: Map<String, Value>,
    tabs: Vec<Tab>,
}

impl ServerInfo {
    /// Parse and validate the document shape once, so later code can rely on
    /// `settings.Tabs` being a list of tabs.
    pub fn from_json_str(raw: &str) -> Result<Self, LeaderboardError> {
        let value: Value = serde_json::from_str(raw)?;
        let missing_settings = || {
            LeaderboardError::MalformedDocument(
                "'settings' section missing from ServerInfo.json.".to_string(),
            )
        };
        let Value::Object(mut document) = value else {
            return Err(missing_settings());
        };

        let settings = document
            .get_mut("settings")
            .and_then(Value::as_object_mut)
            .ok_or_else(missing_settings)?;
        let Some(Value::Array(raw_tabs)) = settings.get_mut("Tabs").map(Value::take) else {
            return Err(LeaderboardError::MalformedDocument(
                "'Tabs' section missing or malformed in ServerInfo.json.".to_string(),
            ));
        };

        let tabs = raw_tabs
            .into_iter()
            .enumerate()
            .map(|(index, tab)| {
                Tab::from_value(tab).ok_or_else(|| {
                    LeaderboardError::MalformedDocument(format!(
                        "tab {} in ServerInfo.json is not an object with a string ButtonText",
                        index
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { document, tabs })
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Take the tab list out, leaving it empty until [`ServerInfo::set_tabs`].
    pub fn take_tabs(&mut self) -> Vec<Tab> {
        std::mem::take(&mut self.tabs)
    }

    pub fn set_tabs(&mut self, tabs: Vec<Tab>) {
        self.tabs = tabs;
    }

    pub fn to_value(&self) -> Value {
        let mut document = self.document.clone();
        if let Some(settings) = document.get_mut("settings").and_then(Value::as_object_mut) {
            settings.insert(
                "Tabs".to_string(),
                Value::Array(self.tabs.iter().map(Tab::to_value).collect()),
            );
        }
        Value::Object(document)
    }

    pub fn to_json_string(&self) -> Result<String, LeaderboardError> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }
}

/// Source and sink of the `ServerInfo.json` document.
pub trait ConfigStore {
    fn read_config(&self) -> Result<ServerInfo, LeaderboardError>;
    fn write_config(&self, document: &ServerInfo) -> Result<(), LeaderboardError>;
}

/// `ServerInfo.json` on disk.
#[derive(Clone, Debug)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl ConfigStore for FileConfigStore {
    fn read_config(&self) -> Result<ServerInfo, LeaderboardError> {
        if !self.exists() {
            return Err(LeaderboardError::MissingInput {
                what: "ServerInfo",
                path: self.path.clone(),
            });
        }
        let raw = fs::read_to_string(&self.path)?;
        ServerInfo::from_json_str(&raw)
    }

    /// Write through a temp file and rename, so a failed write leaves the
    /// previous document in place.
    fn write_config(&self, document: &ServerInfo) -> Result<(), LeaderboardError> {
        let json = document.to_json_string()?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                log::warn!("could not remove {}: {}", tmp.display(), cleanup);
            }
            return Err(e.into());
        }
        log::info!("{} updated", self.path.display());
        Ok(())
    }
}
