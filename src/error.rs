//! Error types shared by the prediction pipeline.

use thiserror::Error;

/// Errors that can occur while turning a clock reading into a tide prediction.
///
/// Every variant carries the offending input so callers driven by a
/// hardware clock can log exactly what the clock handed over.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TideError {
    /// Calendar date does not exist (bad month, day out of range, or a
    /// year with fewer than four digits)
    #[error("invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// No equilibrium argument / node factor row for this year
    #[error("year {year} outside constituent tables ({first}-{last})")]
    YearOutOfRange { year: i32, first: i32, last: i32 },

    /// Successive approximation ran out of steps without a direction change
    #[error("no high or low tide found within search window after hour {after_hours:.2}")]
    NoTurningPoint { after_hours: f64 },

    /// Sampling window cannot be represented as minute offsets
    #[error("unusable sampling window: ±{window_hours}h every {step_minutes} min")]
    InvalidWindow { window_hours: i64, step_minutes: i64 },

    /// Station definition failed validation
    #[error("invalid station: {0}")]
    InvalidStation(String),
}
