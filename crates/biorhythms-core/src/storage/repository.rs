//! Settings persistence behind an injectable trait.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::data_dir;
use super::settings::Settings;
use crate::error::{ConfigError, CoreError, Result};

/// Where settings live. Presentation code receives one of these instead of
/// reaching for a global store.
pub trait SettingsRepository {
    /// Load settings; a store with nothing saved yields defaults.
    fn load(&self) -> Result<Settings>;

    /// Persist settings, replacing whatever was stored.
    fn save(&self, settings: &Settings) -> Result<()>;

    /// Load, apply `f`, save. Returns the updated settings.
    fn update<F>(&self, f: F) -> Result<Settings>
    where
        F: FnOnce(&mut Settings) -> Result<()>,
        Self: Sized,
    {
        let mut settings = self.load()?;
        f(&mut settings)?;
        self.save(&settings)?;
        Ok(settings)
    }
}

/// TOML file store, `config.toml` in the data directory by default.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(data_dir()?.join("config.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsRepository for TomlSettingsStore {
    fn load(&self) -> Result<Settings> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let settings: Settings = toml::from_str(&content).map_err(ConfigError::from)?;
                tracing::debug!(path = %self.path.display(), "loaded settings");
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
                Ok(Settings::default())
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: self.path.clone(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let save_failed = |message: String| -> CoreError {
            ConfigError::SaveFailed {
                path: self.path.clone(),
                message,
            }
            .into()
        };

        let content = toml::to_string_pretty(settings).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(&self.path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }
}

/// In-memory store for tests and headless embedding.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }
}

impl SettingsRepository for MemorySettingsStore {
    fn load(&self) -> Result<Settings> {
        let guard = self
            .settings
            .lock()
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("<memory>"),
                message: e.to_string(),
            })?;
        Ok(guard.clone())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| ConfigError::SaveFailed {
                path: PathBuf::from("<memory>"),
                message: e.to_string(),
            })?;
        *guard = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ThemeMode;
    use chrono::NaiveDate;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("config.toml"));
        assert_eq!(store.load().unwrap(), Settings::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("nested").join("config.toml"));

        let mut settings = Settings::default();
        settings.birth_date = NaiveDate::from_ymd_opt(1990, 1, 1);
        settings.theme = ThemeMode::Dark;
        settings.widget.set_opacity(3, 60);
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = [not toml").unwrap();
        let err = TomlSettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn memory_store_update() {
        let store = MemorySettingsStore::default();
        let updated = store
            .update(|s| {
                s.set("chart.past_days", "7")?;
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.chart.past_days, 7);
        assert_eq!(store.load().unwrap().chart.past_days, 7);
    }
}
