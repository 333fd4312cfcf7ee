//! Persisted user preferences (UI language)

use std::{fs, path::PathBuf, sync::RwLock};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cooking::Language;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    selected_language: Language,
}

/// JSON-file backed preference store, read once at startup and written on change
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    data: RwLock<Preferences>,
}

impl PreferenceStore {
    /// Load preferences from `path`, falling back to defaults when the file
    /// is missing or holds something unrecognized
    pub fn load(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring unreadable preferences in {}: {}", path.display(), e);
                Preferences::default()
            })
        } else {
            Preferences::default()
        };

        info!("Loaded language preference: {:?}", data.selected_language);
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn language(&self) -> Language {
        self.data
            .read()
            .map(|data| data.selected_language)
            .unwrap_or_default()
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        let snapshot = {
            let mut data = self.data.write()
                .map_err(|e| anyhow::anyhow!("Failed to lock preferences: {}", e))?;
            data.selected_language = language;
            data.clone()
        };
        self.persist(&snapshot)?;
        info!("Language preference set to {:?}", language);
        Ok(())
    }

    fn persist(&self, data: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory {}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("egg-timer-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        dir.join("prefs.json")
    }

    #[test]
    fn test_missing_file_defaults_to_turkish() {
        let store = PreferenceStore::load(temp_path("missing")).unwrap();
        assert_eq!(store.language(), Language::Turkish);
    }

    #[test]
    fn test_language_survives_reload() {
        let path = temp_path("reload");
        let store = PreferenceStore::load(path.clone()).unwrap();
        store.set_language(Language::English).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"selected_language\": \"ENGLISH\""));

        let reloaded = PreferenceStore::load(path).unwrap();
        assert_eq!(reloaded.language(), Language::English);
    }

    #[test]
    fn test_unknown_value_falls_back() {
        let path = temp_path("unknown");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"selected_language": "KLINGON"}"#).unwrap();

        let store = PreferenceStore::load(path).unwrap();
        assert_eq!(store.language(), Language::Turkish);
    }
}
