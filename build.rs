//! Build script: validates the built-in language file at compile time.

use std::collections::HashMap;
use std::path::PathBuf;

const REQUIRED_KEYS: &[&str] = &["ButtonText", "HeaderText", "TitleLine1", "TitleLine2"];

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let lang_path: PathBuf = [&manifest_dir, "config", "lang", "en.json"]
        .iter()
        .collect();
    println!("cargo:rerun-if-changed={}", lang_path.display());

    let json = std::fs::read_to_string(&lang_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. en.json must exist and be valid.",
            lang_path.display(),
            e
        )
    });
    let messages: HashMap<String, String> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!("en.json is invalid JSON: {}. Fix the file and rebuild.", e)
    });
    for key in REQUIRED_KEYS {
        if !messages.contains_key(*key) {
            panic!("en.json is missing the \"{}\" message", key);
        }
    }
    if !messages["TitleLine2"].contains("{0}") {
        panic!("en.json: TitleLine2 must contain the {{0}} placeholder for the grand total");
    }
}
