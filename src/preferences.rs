//! Persisted dark/light theme preference
//!
//! The preference lives in a small key-value store under the `darkMode` key with
//! the value `"dark"` or `"light"`. It is read once at startup and written back
//! on every change. When nothing usable is stored, the resolved fallback is
//! written at startup so later sessions see the same mode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EmiResult;

/// Key under which the theme is stored
pub const DARK_MODE_KEY: &str = "darkMode";

/// String key-value storage for user preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> EmiResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> EmiResult<()>;
}

/// In-memory store, mainly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> EmiResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> EmiResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> EmiResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> EmiResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> EmiResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Recognises only the exact stored values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Caption of the button that switches away from this mode
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Switch to Dark Mode",
            ThemeMode::Dark => "Switch to Light Mode",
        }
    }
}

/// Theme preference bound to its store
pub struct ThemePreference<S: PreferenceStore> {
    store: S,
    mode: ThemeMode,
}

impl<S: PreferenceStore> ThemePreference<S> {
    /// Read the stored preference. Falls back to `system_default` when nothing
    /// usable is stored or the store cannot be read.
    ///
    /// A missing or unrecognised value is replaced by the fallback in the store.
    /// A store that cannot be read is left untouched.
    pub fn load(mut store: S, system_default: ThemeMode) -> Self {
        let (mode, persist) = match store.get(DARK_MODE_KEY) {
            Ok(Some(value)) => match ThemeMode::parse(&value) {
                Some(mode) => (mode, false),
                None => {
                    log::warn!("ignoring unrecognised {} value {:?}", DARK_MODE_KEY, value);
                    (system_default, true)
                }
            },
            Ok(None) => (system_default, true),
            Err(e) => {
                log::warn!("could not read theme preference: {}", e);
                (system_default, false)
            }
        };

        if persist {
            match store.set(DARK_MODE_KEY, mode.as_str()) {
                Ok(()) => log::debug!("stored initial theme {}", mode.as_str()),
                Err(e) => log::warn!("could not store theme preference: {}", e),
            }
        }
        Self { store, mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Set and persist the mode
    pub fn set(&mut self, mode: ThemeMode) -> EmiResult<ThemeMode> {
        self.store.set(DARK_MODE_KEY, mode.as_str())?;
        self.mode = mode;
        log::info!("theme preference set to {}", mode.as_str());
        Ok(mode)
    }

    /// Flip between dark and light and persist the new mode
    pub fn toggle(&mut self) -> EmiResult<ThemeMode> {
        self.set(self.mode.toggled())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("emi_prefs_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_stored_value_wins_over_system_default() {
        let mut store = MemoryStore::default();
        store.set(DARK_MODE_KEY, "light").unwrap();
        let pref = ThemePreference::load(store, ThemeMode::Dark);
        assert_eq!(pref.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_missing_or_unknown_value_uses_system_default() {
        let pref = ThemePreference::load(MemoryStore::default(), ThemeMode::Dark);
        assert!(pref.mode().is_dark());

        let mut store = MemoryStore::default();
        store.set(DARK_MODE_KEY, "sepia").unwrap();
        let pref = ThemePreference::load(store, ThemeMode::Light);
        assert_eq!(pref.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_load_stores_resolved_fallback() {
        let pref = ThemePreference::load(MemoryStore::default(), ThemeMode::Dark);
        assert_eq!(pref.store().get(DARK_MODE_KEY).unwrap().as_deref(), Some("dark"));

        let mut store = MemoryStore::default();
        store.set(DARK_MODE_KEY, "sepia").unwrap();
        let pref = ThemePreference::load(store, ThemeMode::Light);
        assert_eq!(pref.store().get(DARK_MODE_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_load_keeps_valid_stored_value() {
        let mut store = MemoryStore::default();
        store.set(DARK_MODE_KEY, "light").unwrap();
        let pref = ThemePreference::load(store, ThemeMode::Dark);
        assert_eq!(pref.store().get(DARK_MODE_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_first_load_creates_file() {
        let path = temp_path("first_load");
        let _ = fs::remove_file(&path);

        let pref = ThemePreference::load(JsonFileStore::new(&path), ThemeMode::Dark);
        assert!(pref.mode().is_dark());
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"darkMode\": \"dark\""));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_toggle_writes_every_time() {
        let mut pref = ThemePreference::load(MemoryStore::default(), ThemeMode::Light);
        assert_eq!(pref.toggle().unwrap(), ThemeMode::Dark);
        assert_eq!(pref.store().get(DARK_MODE_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(pref.toggle().unwrap(), ThemeMode::Light);
        assert_eq!(pref.store().get(DARK_MODE_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_toggle_label() {
        assert_eq!(ThemeMode::Light.toggle_label(), "Switch to Dark Mode");
        assert_eq!(ThemeMode::Dark.toggle_label(), "Switch to Light Mode");
    }

    #[test]
    fn test_json_file_store_persists_across_loads() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        let mut pref = ThemePreference::load(JsonFileStore::new(&path), ThemeMode::Light);
        pref.toggle().unwrap();

        let reloaded = ThemePreference::load(JsonFileStore::new(&path), ThemeMode::Light);
        assert_eq!(reloaded.mode(), ThemeMode::Dark);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"darkMode\": \"dark\""));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_json_file_store_keeps_other_keys() {
        let path = temp_path("other_keys");
        fs::write(&path, r#"{"currency": "INR"}"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        store.set(DARK_MODE_KEY, "dark").unwrap();
        assert_eq!(store.get("currency").unwrap().as_deref(), Some("INR"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();

        let pref = ThemePreference::load(JsonFileStore::new(&path), ThemeMode::Dark);
        assert_eq!(pref.mode(), ThemeMode::Dark);
        // unreadable contents are not overwritten
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
        let _ = fs::remove_file(&path);
    }
}
