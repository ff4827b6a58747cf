//! Chart data derivation.
//!
//! Turns a generated [`Series`] into what a chart or legend renderer needs:
//! curves, the today index, legend percentages with sentiment colors, an
//! accessibility description, and pixel geometry for a given canvas size.
//! Nothing here draws; [`ChartData::render_ascii`] is the text rendering used
//! by the CLI.

use chrono::NaiveDate;
use serde::Serialize;

use crate::color::{PercentColorMapper, Rgb};
use crate::i18n::{self, Language, Text};
use crate::series::{to_percent, Series};

/// Curve amplitude as a fraction of the canvas height.
pub const AMPLITUDE_RATIO: f64 = 0.4;

/// One rhythm's curve over the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub name: String,
    pub label: String,
    pub color: Rgb,
    pub values: Vec<f64>,
}

/// Today's reading for one rhythm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub name: String,
    pub label: String,
    /// Raw value in [-1, 1]
    pub value: f64,
    /// Rounded, clamped percentage
    pub percent: i32,
    /// Sentiment color for `percent`
    pub color: Rgb,
    /// The rhythm's own line color
    pub line_color: Rgb,
}

impl LegendEntry {
    fn new(name: &str, label: String, value: f64, line_color: Rgb, mapper: &PercentColorMapper) -> Self {
        let pct = to_percent(value);
        Self {
            name: name.to_string(),
            label,
            value,
            percent: pct.round() as i32,
            color: mapper.color_for(pct),
            line_color,
        }
    }

    /// Signed percentage, e.g. `+42%`, `-7%`, `+0%`.
    pub fn display_percent(&self) -> String {
        format!("{:+}%", self.percent)
    }
}

/// Everything a chart view needs for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub birth_date: NaiveDate,
    pub reference_date: NaiveDate,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub offsets: Vec<i64>,
    pub today_index: usize,
    pub curves: Vec<Curve>,
    pub legend: Vec<LegendEntry>,
    pub description: String,
}

impl ChartData {
    pub fn from_series(series: &Series, language: Language, mapper: &PercentColorMapper) -> Self {
        let window = series.window;
        let today_index = series.today_index();

        let curves: Vec<Curve> = series
            .rhythms
            .iter()
            .map(|rs| Curve {
                name: rs.rhythm.name().to_string(),
                label: i18n::rhythm_label(language, rs.rhythm.name()),
                color: rs.rhythm.color(),
                values: rs.values().collect(),
            })
            .collect();

        let legend: Vec<LegendEntry> = series
            .today_values()
            .into_iter()
            .map(|(rhythm, value)| {
                LegendEntry::new(
                    rhythm.name(),
                    i18n::rhythm_label(language, rhythm.name()),
                    value,
                    rhythm.color(),
                    mapper,
                )
            })
            .collect();

        let start_date = window.start_date();
        let end_date = window.end_date();
        let description = describe(language, start_date, end_date, &legend);

        Self {
            birth_date: window.birth_date,
            reference_date: window.reference_date,
            start_date,
            end_date,
            offsets: window.offsets().collect(),
            today_index,
            curves,
            legend,
            description,
        }
    }

    /// Text chart: one column per day, `rows` lines from +1 (top) to -1.
    pub fn render_ascii(&self, rows: usize, language: Language) -> String {
        let rows = rows.max(3);
        let cols = self.offsets.len();
        let mut grid = vec![vec![' '; cols]; rows];
        let zero_row = (rows - 1) / 2;

        for (col, _) in self.offsets.iter().enumerate() {
            grid[zero_row][col] = '─';
        }
        if cols > 0 {
            for row in grid.iter_mut() {
                row[self.today_index] = '│';
            }
        }

        for curve in &self.curves {
            let mark = curve
                .label
                .chars()
                .next()
                .map(|c| c.to_uppercase().next().unwrap_or(c))
                .unwrap_or('?');
            for (col, value) in curve.values.iter().enumerate() {
                let row = value_row(*value, rows);
                let cell = &mut grid[row][col];
                *cell = if cell.is_alphabetic() || *cell == '*' { '*' } else { mark };
            }
        }

        let width = cols.max(30);
        let mut output = String::new();
        output.push_str(&self.description);
        output.push('\n');
        output.push_str(&"─".repeat(width + 6));
        output.push('\n');

        for (i, row) in grid.iter().enumerate() {
            let axis = if i == 0 {
                "+1 "
            } else if i == zero_row {
                " 0 "
            } else if i == rows - 1 {
                "-1 "
            } else {
                "   "
            };
            output.push_str(axis);
            output.push_str("│ ");
            output.extend(row.iter());
            output.push('\n');
        }

        output.push_str(&"─".repeat(width + 6));
        output.push('\n');

        let start = self
            .start_date
            .map(|d| i18n::format_day_month(language, d))
            .unwrap_or_default();
        let end = self
            .end_date
            .map(|d| i18n::format_day_month(language, d))
            .unwrap_or_default();
        output.push_str(&format!(
            "     {start}  ·  {today}  ·  {end}\n",
            today = i18n::text(language, Text::LabelToday)
        ));

        output.push('\n');
        for entry in &self.legend {
            output.push_str(&format!("■ {:<18} {:>5}\n", entry.label, entry.display_percent()));
        }
        output.push_str("\n* overlapping curves  │ today\n");
        output
    }
}

fn value_row(value: f64, rows: usize) -> usize {
    let v = if value.is_nan() { 0.0 } else { value.clamp(-1.0, 1.0) };
    let row = ((1.0 - v) / 2.0 * (rows - 1) as f64).round() as usize;
    row.min(rows - 1)
}

/// Accessibility summary: header with the date range, then today's
/// percentage per rhythm.
pub fn describe(
    language: Language,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    legend: &[LegendEntry],
) -> String {
    let fmt = |d: Option<NaiveDate>| {
        d.map(|d| i18n::format_day_month(language, d))
            .unwrap_or_default()
    };
    let header = i18n::chart_description_header(language, &fmt(start), &fmt(end));
    let parts: Vec<String> = legend
        .iter()
        .map(|e| format!("{} {}", e.label, e.percent))
        .collect();
    format!("{header} {}", parts.join(", "))
}

/// Canvas size for pixel geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
}

/// A straight line between two canvas points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotCurve {
    pub name: String,
    pub color: Rgb,
    /// Empty when the curve has fewer than two points
    pub segments: Vec<Segment>,
}

/// Resolved pixel geometry of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plot {
    pub step_x: f64,
    pub center_y: f64,
    pub amplitude: f64,
    pub top_y: f64,
    pub bottom_y: f64,
    pub today_x: f64,
    /// x of each per-day grid line; empty for single-point windows
    pub grid_xs: Vec<f64>,
    pub curves: Vec<PlotCurve>,
}

impl ChartLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `y = center_y - value · amplitude` for one value.
    pub fn y_for(&self, value: f64) -> f64 {
        self.height / 2.0 - value * (self.height * AMPLITUDE_RATIO)
    }

    pub fn plot(&self, data: &ChartData) -> Plot {
        let steps = data.offsets.len();
        let step_x = if steps > 1 {
            self.width / (steps - 1) as f64
        } else {
            self.width
        };
        let center_y = self.height / 2.0;
        let amplitude = self.height * AMPLITUDE_RATIO;

        let grid_xs = if steps > 1 {
            (0..steps).map(|i| i as f64 * step_x).collect()
        } else {
            Vec::new()
        };

        let curves = data
            .curves
            .iter()
            .map(|curve| PlotCurve {
                name: curve.name.clone(),
                color: curve.color,
                segments: curve
                    .values
                    .windows(2)
                    .enumerate()
                    .map(|(i, pair)| Segment {
                        x1: i as f64 * step_x,
                        y1: self.y_for(pair[0]),
                        x2: (i + 1) as f64 * step_x,
                        y2: self.y_for(pair[1]),
                    })
                    .collect(),
            })
            .collect();

        Plot {
            step_x,
            center_y,
            amplitude,
            top_y: center_y - amplitude,
            bottom_y: center_y + amplitude,
            today_x: step_x * data.today_index as f64,
            grid_xs,
            curves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesGenerator;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn chart(birth: NaiveDate, reference: NaiveDate, past: i64, future: i64) -> ChartData {
        let series = SeriesGenerator::default()
            .generate_for(birth, reference, past, future)
            .unwrap();
        ChartData::from_series(&series, Language::En, &PercentColorMapper::default())
    }

    #[test]
    fn birthday_legend_is_neutral() {
        let data = chart(date(1990, 1, 1), date(1990, 1, 1), 15, 15);
        assert_eq!(data.today_index, 15);
        for entry in &data.legend {
            assert_eq!(entry.percent, 0);
            assert_eq!(entry.color, crate::color::NEUTRAL);
            assert_eq!(entry.display_percent(), "+0%");
        }
    }

    #[test]
    fn description_lists_each_rhythm() {
        // 7 days in: emotional is at its peak.
        let data = chart(date(2024, 1, 1), date(2024, 1, 8), 1, 1);
        assert!(data
            .description
            .starts_with("Biorhythm chart from 07 Jan to 09 Jan."));
        assert!(data.description.contains("Emotional 100"));
        assert!(data.description.contains("Physical "));
        assert!(data.description.contains("Intellectual "));
    }

    #[test]
    fn single_point_has_no_segments() {
        let data = chart(date(1990, 1, 1), date(2020, 1, 1), 0, 0);
        let plot = ChartLayout::new(300.0, 200.0).plot(&data);
        assert_eq!(plot.step_x, 300.0);
        assert_eq!(plot.today_x, 0.0);
        assert!(plot.grid_xs.is_empty());
        assert!(plot.curves.iter().all(|c| c.segments.is_empty()));
    }

    #[test]
    fn plot_geometry_follows_values() {
        let data = chart(date(1990, 1, 1), date(2020, 1, 1), 2, 2);
        let layout = ChartLayout::new(400.0, 200.0);
        let plot = layout.plot(&data);

        assert_eq!(plot.step_x, 100.0);
        assert_eq!(plot.center_y, 100.0);
        assert_eq!(plot.amplitude, 80.0);
        assert_eq!(plot.top_y, 20.0);
        assert_eq!(plot.bottom_y, 180.0);
        assert_eq!(plot.today_x, 200.0);
        assert_eq!(plot.grid_xs.len(), 5);

        let physical = &plot.curves[0];
        assert_eq!(physical.segments.len(), 4);
        let first = physical.segments[0];
        assert_eq!(first.x1, 0.0);
        assert_eq!(first.x2, 100.0);
        assert_eq!(first.y1, 100.0 - data.curves[0].values[0] * 80.0);
    }

    #[test]
    fn ascii_render_marks_today_and_legend() {
        let data = chart(date(1990, 1, 1), date(2020, 1, 1), 5, 5);
        let text = data.render_ascii(11, Language::En);
        assert!(text.contains("Today"));
        assert!(text.contains("Physical"));
        assert!(text.contains('│'));
        assert!(text.lines().any(|l| l.starts_with("+1 ")));
    }

    #[test]
    fn value_row_maps_extremes() {
        assert_eq!(value_row(1.0, 11), 0);
        assert_eq!(value_row(0.0, 11), 5);
        assert_eq!(value_row(-1.0, 11), 10);
        assert_eq!(value_row(5.0, 11), 0);
    }
}
