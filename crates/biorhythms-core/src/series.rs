//! Biorhythm series generation.
//!
//! `value = sin(2π · days_from_birth / period)`, evaluated for every day of a
//! [`DateWindow`] and every rhythm of a [`RhythmSet`]. Negative day deltas
//! (dates before birth) are valid input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::ValidationError;
use crate::rhythm::{Rhythm, RhythmSet};
use crate::window::DateWindow;

/// Value of a rhythm with `period` days, `days_from_birth` days after birth.
pub fn biorhythm_value(days_from_birth: i64, period: f64) -> f64 {
    (2.0 * PI * days_from_birth as f64 / period).sin()
}

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Scale a value in [-1, 1] to a percentage, clamped to [-100, 100].
pub fn to_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value * 100.0).clamp(-100.0, 100.0)
}

/// One day of one rhythm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Days relative to the reference date
    pub day_offset: i64,
    /// Rhythm value in [-1, 1]
    pub value: f64,
}

/// All points for a single rhythm, ordered by offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RhythmSeries {
    pub rhythm: Rhythm,
    pub points: Vec<SeriesPoint>,
}

impl RhythmSeries {
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Value at `index`, `None` when out of range.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).map(|p| p.value)
    }
}

/// Generated series for every rhythm over one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub window: DateWindow,
    pub rhythms: Vec<RhythmSeries>,
}

impl Series {
    /// Number of points in each rhythm's sequence.
    pub fn len(&self) -> usize {
        self.rhythms.first().map_or(0, |r| r.points.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn today_index(&self) -> usize {
        crate::window::today_index(self.window.past_days as usize, self.len())
    }

    pub fn get(&self, name: &str) -> Option<&RhythmSeries> {
        self.rhythms.iter().find(|r| r.rhythm.name() == name)
    }

    /// Value of each rhythm at the today index (0.0 when absent).
    pub fn today_values(&self) -> Vec<(&Rhythm, f64)> {
        let index = self.today_index();
        self.rhythms
            .iter()
            .map(|r| (&r.rhythm, r.value_at(index).unwrap_or(0.0)))
            .collect()
    }
}

/// Produces per-day rhythm values for a window.
#[derive(Debug, Clone, Default)]
pub struct SeriesGenerator {
    rhythms: RhythmSet,
}

impl SeriesGenerator {
    pub fn new(rhythms: RhythmSet) -> Self {
        Self { rhythms }
    }

    pub fn rhythms(&self) -> &RhythmSet {
        &self.rhythms
    }

    /// Generate the series for an already validated window.
    pub fn generate(&self, window: &DateWindow) -> Series {
        let base = days_between(window.birth_date, window.reference_date);
        tracing::debug!(
            days_from_birth = base,
            points = window.len(),
            rhythms = self.rhythms.len(),
            "generating biorhythm series"
        );

        let rhythms = self
            .rhythms
            .iter()
            .map(|rhythm| RhythmSeries {
                rhythm: rhythm.clone(),
                points: window
                    .offsets()
                    .map(|offset| SeriesPoint {
                        day_offset: offset,
                        value: biorhythm_value(base + offset, rhythm.period()),
                    })
                    .collect(),
            })
            .collect();

        Series {
            window: *window,
            rhythms,
        }
    }

    /// Validate the window bounds, then generate.
    pub fn generate_for(
        &self,
        birth_date: NaiveDate,
        reference_date: NaiveDate,
        past_days: i64,
        future_days: i64,
    ) -> Result<Series, ValidationError> {
        let window = DateWindow::new(birth_date, reference_date, past_days, future_days)?;
        Ok(self.generate(&window))
    }

    /// Value of each rhythm on a single date.
    pub fn values_on(&self, birth_date: NaiveDate, date: NaiveDate) -> Vec<(&Rhythm, f64)> {
        let days = days_between(birth_date, date);
        self.rhythms
            .iter()
            .map(|r| (r, biorhythm_value(days, r.period())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_is_zero_for_every_rhythm() {
        let generator = SeriesGenerator::default();
        let series = generator.generate_for(date(1990, 1, 1), date(1990, 1, 1), 0, 0).unwrap();
        assert_eq!(series.len(), 1);
        for (_, value) in series.today_values() {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn one_physical_cycle_returns_to_zero() {
        let generator = SeriesGenerator::default();
        let values = generator.values_on(date(1990, 1, 1), date(1990, 1, 24));
        let (rhythm, physical) = values[0];
        assert_eq!(rhythm.name(), "physical");
        assert!(physical.abs() < 1e-12);
    }

    #[test]
    fn quarter_cycle_peaks() {
        // 7 days into a 28-day cycle is a quarter turn.
        assert!((biorhythm_value(7, 28.0) - 1.0).abs() < 1e-12);
        assert!((biorhythm_value(21, 28.0) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn offsets_are_ascending_and_centered() {
        let generator = SeriesGenerator::default();
        let series = generator.generate_for(date(1990, 1, 1), date(2024, 5, 1), 15, 15).unwrap();
        assert_eq!(series.len(), 31);
        assert_eq!(series.today_index(), 15);

        let physical = series.get("physical").unwrap();
        let offsets: Vec<i64> = physical.points.iter().map(|p| p.day_offset).collect();
        assert_eq!(offsets.first(), Some(&-15));
        assert_eq!(offsets.last(), Some(&15));
        assert!(offsets.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn point_matches_direct_formula() {
        let generator = SeriesGenerator::default();
        let birth = date(1985, 7, 14);
        let reference = date(2023, 11, 2);
        let series = generator.generate_for(birth, reference, 3, 4).unwrap();

        for rs in &series.rhythms {
            for p in &rs.points {
                let d = reference + chrono::Duration::days(p.day_offset);
                let expected = biorhythm_value(days_between(birth, d), rs.rhythm.period());
                assert_eq!(p.value, expected);
            }
        }
    }

    #[test]
    fn dates_before_birth_are_valid() {
        let generator = SeriesGenerator::default();
        let series = generator.generate_for(date(2000, 1, 1), date(1999, 12, 25), 2, 2).unwrap();
        assert_eq!(series.len(), 5);
        let today = series.get("physical").unwrap().value_at(2).unwrap();
        assert!((today - biorhythm_value(-7, 23.0)).abs() < 1e-15);
    }

    #[test]
    fn negative_window_is_an_error() {
        let generator = SeriesGenerator::default();
        assert!(generator.generate_for(date(2000, 1, 1), date(2000, 1, 1), -1, 0).is_err());
    }

    #[test]
    fn to_percent_clamps() {
        assert_eq!(to_percent(0.5), 50.0);
        assert_eq!(to_percent(1.7), 100.0);
        assert_eq!(to_percent(-3.0), -100.0);
        assert_eq!(to_percent(f64::NAN), 0.0);
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(days_between(date(2024, 3, 1), date(2024, 2, 28)), -2);
    }
}
