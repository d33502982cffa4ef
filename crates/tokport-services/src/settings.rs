//! Opaque key-value persistence for the message API (`save-settings`,
//! `load-config` and friends). One JSON object per file.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokport_core::Result;

pub const SETTINGS_KEY: &str = "github-settings-v2";
pub const CONFIG_KEY: &str = "export-config";

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$CONFIG_DIR/tokport/settings.json`, or `./.tokport/settings.json`
    /// when the platform has no config dir.
    pub fn default_location() -> Self {
        let base = dirs::config_dir()
            .map(|d| d.join("tokport"))
            .unwrap_or_else(|| PathBuf::from(".tokport"));
        Self::new(base.join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    /// Stored value, or `Value::Null` when nothing was saved under `key`.
    pub fn load(&self, key: &str) -> Result<Value> {
        Ok(self.read_all()?.remove(key).unwrap_or(Value::Null))
    }

    pub fn save(&self, key: &str, value: Value) -> Result<()> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(all))?)?;
        tracing::debug!(event = "settings_saved", key, path = %self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_loads_null() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested/settings.json"));
        assert_eq!(store.load(SETTINGS_KEY).unwrap(), Value::Null);
    }

    #[test]
    fn keys_are_independent_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/settings.json");
        let store = SettingsStore::new(&path);
        store.save(SETTINGS_KEY, json!({"username": "acme", "repo": "app"})).unwrap();
        store.save(CONFIG_KEY, json!({"platforms": {"flutter": true}})).unwrap();
        store.save(SETTINGS_KEY, json!({"username": "other"})).unwrap();

        let reopened = SettingsStore::new(&path);
        assert_eq!(reopened.load(SETTINGS_KEY).unwrap(), json!({"username": "other"}));
        assert_eq!(reopened.load(CONFIG_KEY).unwrap()["platforms"]["flutter"], true);
    }
}
