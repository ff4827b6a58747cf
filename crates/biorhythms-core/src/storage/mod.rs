mod repository;
mod settings;

pub use repository::{MemorySettingsStore, SettingsRepository, TomlSettingsStore};
pub use settings::{ChartSettings, Settings, ThemeMode, WidgetSettings, DEFAULT_WIDGET_OPACITY};

use std::path::PathBuf;

/// Returns the settings directory, creating it if needed.
///
/// `BIORHYTHMS_CONFIG_DIR` wins when set. Otherwise `~/.config/biorhythms`,
/// or `~/.config/biorhythms-dev` when `BIORHYTHMS_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("BIORHYTHMS_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("BIORHYTHMS_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("biorhythms-dev")
            } else {
                base_dir.join("biorhythms")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
