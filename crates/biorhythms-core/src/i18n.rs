//! Localized labels for legends, chart descriptions and the widget.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rhythm::RhythmKind;

/// UI language preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Follow the environment locale
    #[default]
    System,
    Ru,
    En,
}

impl Language {
    /// Resolve `System` to a concrete language using `LANG`/`LC_ALL`.
    pub fn resolve(self) -> Language {
        match self {
            Language::System => {
                let vars = [std::env::var("LC_ALL").ok(), std::env::var("LANG").ok()];
                Self::from_locale(first_locale(&vars))
            }
            other => other,
        }
    }

    /// Concrete language for a POSIX locale string such as `ru_RU.UTF-8`.
    pub fn from_locale(locale: &str) -> Language {
        if locale.to_lowercase().starts_with("ru") {
            Language::Ru
        } else {
            Language::En
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Language::System => "system",
            Language::Ru => "ru",
            Language::En => "en",
        };
        f.write_str(s)
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Language::System),
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            _ => Err(format!("unknown language '{s}': use system, ru or en")),
        }
    }
}

/// First non-empty locale in priority order, `""` when none is set.
fn first_locale(candidates: &[Option<String>]) -> &str {
    candidates
        .iter()
        .flatten()
        .map(String::as_str)
        .find(|v| !v.is_empty())
        .unwrap_or("")
}

/// Keys of the string catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    LegendPhysical,
    LegendEmotional,
    LegendIntellectual,
    LabelToday,
    WidgetTitle,
    WidgetNoBirthDate,
}

/// Localized string for `key`. `System` is resolved first.
pub fn text(language: Language, key: Text) -> &'static str {
    match (language.resolve(), key) {
        (Language::Ru, Text::LegendPhysical) => "Физический",
        (Language::Ru, Text::LegendEmotional) => "Эмоциональный",
        (Language::Ru, Text::LegendIntellectual) => "Интеллектуальный",
        (Language::Ru, Text::LabelToday) => "Сегодня",
        (Language::Ru, Text::WidgetTitle) => "Биоритмы",
        (Language::Ru, Text::WidgetNoBirthDate) => "Укажите дату рождения",
        (_, Text::LegendPhysical) => "Physical",
        (_, Text::LegendEmotional) => "Emotional",
        (_, Text::LegendIntellectual) => "Intellectual",
        (_, Text::LabelToday) => "Today",
        (_, Text::WidgetTitle) => "Biorhythms",
        (_, Text::WidgetNoBirthDate) => "Set your birth date",
    }
}

/// Legend label for a classic rhythm.
pub fn kind_label(language: Language, kind: RhythmKind) -> &'static str {
    let key = match kind {
        RhythmKind::Physical => Text::LegendPhysical,
        RhythmKind::Emotional => Text::LegendEmotional,
        RhythmKind::Intellectual => Text::LegendIntellectual,
    };
    text(language, key)
}

/// Display label for a rhythm name. Unknown names are returned as-is.
pub fn rhythm_label(language: Language, name: &str) -> String {
    match RhythmKind::from_name(name) {
        Some(kind) => kind_label(language, kind).to_string(),
        None => name.to_string(),
    }
}

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_RU: [&str; 12] = [
    "янв", "фев", "мар", "апр", "мая", "июн", "июл", "авг", "сен", "окт", "ноя", "дек",
];

/// `dd Mon` in the given language, e.g. `05 Mar`.
pub fn format_day_month(language: Language, date: NaiveDate) -> String {
    let months = match language.resolve() {
        Language::Ru => &MONTHS_RU,
        _ => &MONTHS_EN,
    };
    format!("{:02} {}", date.day(), months[date.month0() as usize])
}

/// Header of the chart's accessibility description.
pub fn chart_description_header(language: Language, start: &str, end: &str) -> String {
    match language.resolve() {
        Language::Ru => format!("График биоритмов с {start} по {end}."),
        _ => format!("Biorhythm chart from {start} to {end}."),
    }
}
