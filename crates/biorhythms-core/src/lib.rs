//! # Biorhythms Core Library
//!
//! Headless computation behind the Biorhythms app. Every front end (the CLI,
//! a chart view, the home-screen widget) goes through the same two pieces:
//!
//! - **Series generation**: physical, emotional and intellectual sine cycles
//!   (23/28/33 days) evaluated per day over a window around a reference date
//! - **Percent coloring**: a red -> yellow -> green gradient for a percentage
//!   in [-100, 100]
//!
//! Around them sit chart derivation (today index, legend, accessibility text,
//! plot geometry), the widget summary, localized labels, and settings
//! persistence behind the [`SettingsRepository`] trait.
//!
//! ## Key Components
//!
//! - [`SeriesGenerator`]: per-day rhythm values for a [`DateWindow`]
//! - [`PercentColorMapper`]: sentiment color for a percentage
//! - [`ChartData`]: everything a chart/legend renderer needs
//! - [`WidgetSummary`]: condensed rows for the widget
//! - [`Settings`]: user preferences, stored as TOML

pub mod chart;
pub mod color;
pub mod error;
pub mod i18n;
pub mod rhythm;
pub mod series;
pub mod storage;
pub mod widget;
pub mod window;

pub use chart::{ChartData, ChartLayout, Curve, LegendEntry, Plot, PlotCurve, Segment};
pub use color::{color_for, PercentColorMapper, Rgb};
pub use error::{ConfigError, CoreError, ValidationError};
pub use i18n::Language;
pub use rhythm::{Rhythm, RhythmKind, RhythmSet};
pub use series::{biorhythm_value, days_between, to_percent, RhythmSeries, Series, SeriesGenerator, SeriesPoint};
pub use storage::{MemorySettingsStore, Settings, SettingsRepository, ThemeMode, TomlSettingsStore};
pub use widget::{WidgetContent, WidgetRow, WidgetSummary};
pub use window::{parse_date, DateWindow, MAX_WINDOW_DAYS};
