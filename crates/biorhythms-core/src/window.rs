//! Day windows around a reference date.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::ValidationError;

pub const DEFAULT_PAST_DAYS: u32 = 15;
pub const DEFAULT_FUTURE_DAYS: u32 = 15;
/// Largest accepted day count on either side of the reference date (ten years).
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Birth date, reference date and the inclusive offset range
/// `[-past_days, +future_days]` around the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub birth_date: NaiveDate,
    pub reference_date: NaiveDate,
    pub past_days: u32,
    pub future_days: u32,
}

impl DateWindow {
    /// Build a window. Negative day counts and counts above
    /// [`MAX_WINDOW_DAYS`] are rejected, never corrected.
    pub fn new(
        birth_date: NaiveDate,
        reference_date: NaiveDate,
        past_days: i64,
        future_days: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            birth_date,
            reference_date,
            past_days: Self::check_days("past_days", past_days)?,
            future_days: Self::check_days("future_days", future_days)?,
        })
    }

    /// Window with the default 15/15 day span.
    pub fn around(birth_date: NaiveDate, reference_date: NaiveDate) -> Self {
        Self {
            birth_date,
            reference_date,
            past_days: DEFAULT_PAST_DAYS,
            future_days: DEFAULT_FUTURE_DAYS,
        }
    }

    fn check_days(field: &'static str, value: i64) -> Result<u32, ValidationError> {
        if value < 0 {
            return Err(ValidationError::InvalidWindow { field, value });
        }
        match u32::try_from(value) {
            Ok(days) if days <= MAX_WINDOW_DAYS => Ok(days),
            _ => Err(ValidationError::WindowTooLarge {
                field,
                value,
                max: MAX_WINDOW_DAYS,
            }),
        }
    }

    /// Offsets relative to the reference date, ascending.
    pub fn offsets(&self) -> RangeInclusive<i64> {
        -i64::from(self.past_days)..=i64::from(self.future_days)
    }

    /// Number of days covered, including the reference date.
    pub fn len(&self) -> usize {
        self.past_days as usize + self.future_days as usize + 1
    }

    /// Always false; a window contains at least the reference date.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Position of offset 0 in the offset sequence.
    pub fn today_index(&self) -> usize {
        today_index(self.past_days as usize, self.len())
    }

    /// Calendar date for `offset`, or `None` past chrono's supported range.
    pub fn date_at(&self, offset: i64) -> Option<NaiveDate> {
        self.reference_date
            .checked_add_signed(Duration::try_days(offset)?)
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.date_at(-i64::from(self.past_days))
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.date_at(i64::from(self.future_days))
    }
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        input: input.to_string(),
    })
}

/// Index of "today" in a sequence of `len` points whose first point lies
/// `past_days` before today. Clamped to the last valid index.
pub fn today_index(past_days: usize, len: usize) -> usize {
    past_days.min(len.saturating_sub(1))
}
