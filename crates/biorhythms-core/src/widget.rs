//! Condensed summary for the home-screen widget.
//!
//! Uses the same series formula and the same three-stop gradient as the
//! chart legend so both surfaces always agree.

use chrono::NaiveDate;
use serde::Serialize;

use crate::color::{PercentColorMapper, Rgb};
use crate::i18n::{self, Language, Text};
use crate::series::{to_percent, SeriesGenerator};
use crate::storage::Settings;

pub const DARK_BACKGROUND: Rgb = Rgb::from_hex(0x131A3A);
pub const LIGHT_BACKGROUND: Rgb = Rgb::from_hex(0xFFFFFF);
pub const DARK_TEXT: Rgb = Rgb::from_hex(0xE8EDFF);
pub const LIGHT_TEXT: Rgb = Rgb::from_hex(0x0B1026);

/// One rhythm line of the widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetRow {
    pub name: String,
    pub label: String,
    pub percent: i32,
    /// Sentiment color of the percentage text
    pub percent_color: Rgb,
    /// Rhythm color of the bar fill
    pub bar_color: Rgb,
    /// Filled share of the bar, 0.0 at -100% and 1.0 at +100%
    pub bar_fill: f64,
}

impl WidgetRow {
    pub fn display_percent(&self) -> String {
        format!("{:+}%", self.percent)
    }
}

/// Background color plus an 8-bit alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Background {
    pub color: Rgb,
    pub alpha: u8,
}

impl Background {
    /// `opacity` is a percentage, clamped to 0-100.
    pub fn new(dark: bool, opacity: u8) -> Self {
        let opacity = u32::from(opacity.min(100));
        Self {
            color: if dark { DARK_BACKGROUND } else { LIGHT_BACKGROUND },
            alpha: (opacity * 255 / 100) as u8,
        }
    }

    /// Packed `0xAARRGGBB`.
    pub fn argb(&self) -> u32 {
        (u32::from(self.alpha) << 24)
            | (u32::from(self.color.r) << 16)
            | (u32::from(self.color.g) << 8)
            | u32::from(self.color.b)
    }
}

/// What the widget shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WidgetContent {
    /// Birth date known; one row per rhythm
    Ready {
        date: NaiveDate,
        rows: Vec<WidgetRow>,
    },
    /// No birth date stored yet
    NoBirthDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSummary {
    pub widget_id: u32,
    pub title: String,
    pub dark: bool,
    pub background: Background,
    pub text_color: Rgb,
    pub content: WidgetContent,
}

impl WidgetSummary {
    /// Build the summary for `widget_id` on `today`.
    pub fn build(
        generator: &SeriesGenerator,
        settings: &Settings,
        widget_id: u32,
        today: NaiveDate,
        system_dark: bool,
    ) -> Self {
        let mapper = PercentColorMapper::default();
        let language: Language = settings.language;
        let dark = settings.theme.is_dark(system_dark);
        let background = Background::new(dark, settings.widget.opacity(widget_id));
        let text_color = if dark { DARK_TEXT } else { LIGHT_TEXT };

        let (title, content) = match settings.birth_date {
            Some(birth_date) => {
                let rows = generator
                    .values_on(birth_date, today)
                    .into_iter()
                    .map(|(rhythm, value)| {
                        let pct = to_percent(value);
                        WidgetRow {
                            name: rhythm.name().to_string(),
                            label: i18n::rhythm_label(language, rhythm.name()),
                            percent: pct.round() as i32,
                            percent_color: mapper.color_for(pct),
                            bar_color: rhythm.color(),
                            bar_fill: (pct + 100.0) / 200.0,
                        }
                    })
                    .collect();
                (
                    i18n::text(language, Text::WidgetTitle),
                    WidgetContent::Ready { date: today, rows },
                )
            }
            None => (
                i18n::text(language, Text::WidgetNoBirthDate),
                WidgetContent::NoBirthDate,
            ),
        };

        tracing::debug!(widget_id, dark, alpha = background.alpha, "built widget summary");

        Self {
            widget_id,
            title: title.to_string(),
            dark,
            background,
            text_color,
            content,
        }
    }
}
