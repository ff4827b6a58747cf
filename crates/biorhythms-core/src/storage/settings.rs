//! User settings.
//!
//! Stores:
//! - Birth date
//! - Theme and language
//! - Chart window span
//! - Per-widget opacity
//!
//! Serialized as TOML by [`super::TomlSettingsStore`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::i18n::Language;
use crate::window::{DEFAULT_FUTURE_DAYS, DEFAULT_PAST_DAYS, MAX_WINDOW_DAYS};

pub const DEFAULT_WIDGET_OPACITY: u8 = 100;

/// Theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    /// Whether to render dark, given what the system prefers.
    pub fn is_dark(self, system_dark: bool) -> bool {
        match self {
            ThemeMode::System => system_dark,
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ThemeMode::System => "system",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        f.write_str(s)
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(ThemeMode::System),
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(format!("unknown theme '{s}': use system, light or dark")),
        }
    }
}

/// Chart window configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_past_days")]
    pub past_days: u32,
    #[serde(default = "default_future_days")]
    pub future_days: u32,
}

/// Home-screen widget configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSettings {
    /// Opacity in percent (0-100), keyed by widget id
    #[serde(default)]
    pub opacity: BTreeMap<String, u8>,
}

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub widget: WidgetSettings,
}

fn default_past_days() -> u32 {
    DEFAULT_PAST_DAYS
}
fn default_future_days() -> u32 {
    DEFAULT_FUTURE_DAYS
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            past_days: default_past_days(),
            future_days: default_future_days(),
        }
    }
}

impl WidgetSettings {
    pub fn opacity(&self, widget_id: u32) -> u8 {
        self.opacity
            .get(&widget_id.to_string())
            .copied()
            .unwrap_or(DEFAULT_WIDGET_OPACITY)
            .min(100)
    }

    /// Store opacity, clamped to 0-100.
    pub fn set_opacity(&mut self, widget_id: u32, opacity: u8) {
        self.opacity.insert(widget_id.to_string(), opacity.min(100));
    }

    pub fn remove(&mut self, widget_id: u32) {
        self.opacity.remove(&widget_id.to_string());
    }
}

impl Settings {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    _ if value.is_empty() || value.eq_ignore_ascii_case("none") => {
                        serde_json::Value::Null
                    }
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Get a settings value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key, checking it against the field's type.
    ///
    /// `widget.opacity.<id>` addresses a single widget; `none` removes it.
    /// Does not persist; hand the result to a [`super::SettingsRepository`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        if let Some(id) = key.strip_prefix("widget.opacity.") {
            return self.set_widget_opacity(key, id, value);
        }

        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Settings =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate(key)?;
        *self = updated;
        Ok(())
    }

    fn set_widget_opacity(&mut self, key: &str, id: &str, value: &str) -> Result<(), ConfigError> {
        let widget_id: u32 = id
            .parse()
            .map_err(|_| ConfigError::UnknownKey(key.to_string()))?;
        if value.is_empty() || value.eq_ignore_ascii_case("none") {
            self.widget.remove(widget_id);
            return Ok(());
        }
        match value.parse::<u8>() {
            Ok(opacity) if opacity <= 100 => {
                self.widget.set_opacity(widget_id, opacity);
                Ok(())
            }
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("opacity must be 0-100 (got '{value}')"),
            }),
        }
    }

    /// Range checks serde cannot express.
    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        for (field, days) in [
            ("past_days", self.chart.past_days),
            ("future_days", self.chart.future_days),
        ] {
            if days > MAX_WINDOW_DAYS {
                return Err(invalid(format!(
                    "chart.{field} must be <= {MAX_WINDOW_DAYS} (got {days})"
                )));
            }
        }
        if let Some((id, opacity)) = self.widget.opacity.iter().find(|(_, o)| **o > 100) {
            return Err(invalid(format!(
                "opacity for widget {id} must be 0-100 (got {opacity})"
            )));
        }
        Ok(())
    }

    /// Stored birth date, or `MissingKey("birth_date")`.
    pub fn require_birth_date(&self) -> Result<NaiveDate, ConfigError> {
        self.birth_date
            .ok_or_else(|| ConfigError::MissingKey("birth_date".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
        assert_eq!(parsed.chart.past_days, 15);
        assert_eq!(parsed.theme, ThemeMode::System);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let parsed: Settings = toml::from_str("").unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn birth_date_roundtrips_as_iso_date() {
        let mut settings = Settings::default();
        settings.birth_date = NaiveDate::from_ymd_opt(1990, 1, 1);
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        assert!(toml_str.contains("birth_date = \"1990-01-01\""));
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.birth_date, settings.birth_date);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let settings = Settings::default();
        assert_eq!(settings.get("chart.past_days").as_deref(), Some("15"));
        assert_eq!(settings.get("theme").as_deref(), Some("system"));
        assert_eq!(settings.get("birth_date").as_deref(), Some("null"));
        assert!(settings.get("chart.missing_key").is_none());
    }

    #[test]
    fn set_updates_typed_fields() {
        let mut settings = Settings::default();
        settings.set("chart.future_days", "30").unwrap();
        settings.set("theme", "dark").unwrap();
        settings.set("language", "ru").unwrap();
        settings.set("birth_date", "1988-02-29").unwrap();

        assert_eq!(settings.chart.future_days, 30);
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.language, Language::Ru);
        assert_eq!(settings.birth_date, NaiveDate::from_ymd_opt(1988, 2, 29));
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("chart.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            settings.set("chart.past_days", "-3"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set("theme", "purple"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set("birth_date", "1990-13-01"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn widget_opacity_defaults_and_clamps() {
        let mut widget = WidgetSettings::default();
        assert_eq!(widget.opacity(7), 100);
        widget.set_opacity(7, 40);
        assert_eq!(widget.opacity(7), 40);
        widget.set_opacity(8, 250);
        assert_eq!(widget.opacity(8), 100);
        widget.remove(7);
        assert_eq!(widget.opacity(7), 100);
    }

    #[test]
    fn set_addresses_single_widget_opacity() {
        let mut settings = Settings::default();
        settings.set("widget.opacity.3", "40").unwrap();
        assert_eq!(settings.widget.opacity(3), 40);
        assert_eq!(settings.get("widget.opacity.3").as_deref(), Some("40"));

        assert!(matches!(
            settings.set("widget.opacity.3", "250"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set("widget.opacity.abc", "10"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert_eq!(settings.widget.opacity(3), 40);

        settings.set("widget.opacity.3", "none").unwrap();
        assert_eq!(settings.widget.opacity(3), DEFAULT_WIDGET_OPACITY);
        assert!(settings.get("widget.opacity.3").is_none());
    }

    #[test]
    fn set_rejects_out_of_range_values_in_bulk_edits() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("widget.opacity", r#"{"3":250}"#),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set("chart.past_days", "4000000000"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(settings, Settings::default());

        settings.set("widget.opacity", r#"{"3":60}"#).unwrap();
        assert_eq!(settings.widget.opacity(3), 60);
    }

    #[test]
    fn birth_date_can_be_cleared_once_set() {
        let mut settings = Settings::default();
        settings.set("birth_date", "1990-01-01").unwrap();
        settings.set("birth_date", "none").unwrap();
        assert_eq!(settings.birth_date, None);

        settings.set("birth_date", "1990-01-01").unwrap();
        settings.set("birth_date", "").unwrap();
        assert_eq!(settings.birth_date, None);

        assert!(matches!(
            settings.set("theme", "none"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn theme_resolution() {
        assert!(ThemeMode::System.is_dark(true));
        assert!(!ThemeMode::System.is_dark(false));
        assert!(!ThemeMode::Light.is_dark(true));
        assert!(ThemeMode::Dark.is_dark(false));
    }
}
