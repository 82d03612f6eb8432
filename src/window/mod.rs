//! Expiration windows
//!
//! Derives the near-term and far-term date ranges used to select short-dated
//! and long-dated call expirations, relative to a reference date.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First eligible expiration date
    pub start: NaiveDate,
    /// Last eligible expiration date
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window, rejecting an inverted range
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Whether a date falls inside the window (bounds inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Start bound formatted for provider queries (YYYY-MM-DD)
    pub fn from_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// End bound formatted for provider queries (YYYY-MM-DD)
    pub fn to_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.start, self.end)
    }
}

/// Invalid window configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("window start {start} is after end {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
    #[error("{label} offsets are inverted: start {start}d > end {end}d")]
    InvertedOffsets {
        label: &'static str,
        start: i64,
        end: i64,
    },
    #[error("far-term start {far_start}d must be after near-term end {near_end}d")]
    Overlap { near_end: i64, far_start: i64 },
    #[error("window offsets must be non-negative, got {0}d")]
    NegativeOffset(i64),
    #[error("window offset {offset}d exceeds the {max}d limit")]
    OffsetTooLarge { offset: i64, max: i64 },
    #[error("{reference} + {offset}d is outside the supported date range")]
    OutOfRange { reference: NaiveDate, offset: i64 },
}

/// Largest accepted day offset (about a century)
pub const MAX_OFFSET_DAYS: i64 = 36_500;

/// Day offsets from the reference date for both windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowOffsets {
    #[serde(default = "default_near_start_days")]
    pub near_start_days: i64,
    #[serde(default = "default_near_end_days")]
    pub near_end_days: i64,
    #[serde(default = "default_far_start_days")]
    pub far_start_days: i64,
    #[serde(default = "default_far_end_days")]
    pub far_end_days: i64,
}

fn default_near_start_days() -> i64 {
    6
}
fn default_near_end_days() -> i64 {
    11
}
fn default_far_start_days() -> i64 {
    330
}
fn default_far_end_days() -> i64 {
    600
}

impl Default for WindowOffsets {
    fn default() -> Self {
        Self {
            near_start_days: 6,
            near_end_days: 11,
            far_start_days: 330,
            far_end_days: 600,
        }
    }
}

impl WindowOffsets {
    /// Check that both ranges are ordered and the far window starts after the near one ends
    pub fn validate(&self) -> Result<(), WindowError> {
        for offset in [
            self.near_start_days,
            self.near_end_days,
            self.far_start_days,
            self.far_end_days,
        ] {
            if offset < 0 {
                return Err(WindowError::NegativeOffset(offset));
            }
            if offset > MAX_OFFSET_DAYS {
                return Err(WindowError::OffsetTooLarge {
                    offset,
                    max: MAX_OFFSET_DAYS,
                });
            }
        }
        if self.near_start_days > self.near_end_days {
            return Err(WindowError::InvertedOffsets {
                label: "near-term",
                start: self.near_start_days,
                end: self.near_end_days,
            });
        }
        if self.far_start_days > self.far_end_days {
            return Err(WindowError::InvertedOffsets {
                label: "far-term",
                start: self.far_start_days,
                end: self.far_end_days,
            });
        }
        if self.far_start_days <= self.near_end_days {
            return Err(WindowError::Overlap {
                near_end: self.near_end_days,
                far_start: self.far_start_days,
            });
        }
        Ok(())
    }

    /// Compute (near, far) windows for a reference date.
    ///
    /// Ordering follows from validated offsets. Fails when a bound falls
    /// outside the calendar range chrono supports.
    pub fn compute(&self, reference: NaiveDate) -> Result<(DateWindow, DateWindow), WindowError> {
        let near = DateWindow {
            start: shift(reference, self.near_start_days)?,
            end: shift(reference, self.near_end_days)?,
        };
        let far = DateWindow {
            start: shift(reference, self.far_start_days)?,
            end: shift(reference, self.far_end_days)?,
        };
        Ok((near, far))
    }
}

fn shift(reference: NaiveDate, offset: i64) -> Result<NaiveDate, WindowError> {
    let days = u64::try_from(offset).map_err(|_| WindowError::NegativeOffset(offset))?;
    reference
        .checked_add_days(Days::new(days))
        .ok_or(WindowError::OutOfRange { reference, offset })
}

/// Near-term [ref+6d, ref+11d] and far-term [ref+330d, ref+600d] windows
pub fn compute_windows(reference: NaiveDate) -> Result<(DateWindow, DateWindow), WindowError> {
    WindowOffsets::default().compute(reference)
}
