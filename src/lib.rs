//! # Harmonic Tide Calculator Library
//!
//! Predicts water level at a tide station from its harmonic constituents,
//! and finds the times of high and low water. Built for small devices that
//! read the time from a real-time clock and have no network access.
//!
//! ## Design Philosophy
//!
//! ### Closed-Form Prediction
//! - **No data downloads**: Heights come from a sum of 37 cosine terms evaluated
//!   on the spot (see [`harmonics`])
//! - **Static tables**: Constituent speeds, equilibrium arguments and node factors
//!   are compiled in for 2015-2024 (see [`constituents`])
//! - **Per-station data**: Only amplitudes, phase lags, datum and time zone vary
//!   between stations (see [`station`])
//!
//! ### High and Low Water
//! Turning points are found by successive approximation on the sign of the
//! derivative: half-hour strides forward, then one-minute steps back
//! (see [`search`]). Results are accurate to the minute.
//!
//! ### Memory Efficiency
//! - Tables are `f32`, evaluation is `f64`, outputs are `f32`
//! - A full ±12 h chart at 10-minute spacing is 145 [`Sample`]s, under 1.2 KB
//!
//! ## Core Types
//! - [`TideCalc`]: station-bound predictor, the main entry point
//! - [`TideEvent`]: a high or low tide with its time and height
//! - [`Sample`] / [`TideSeries`]: a sampled window of the tide curve

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod calendar;
pub mod clock;
pub mod config;
pub mod constituents;
pub mod error;
pub mod harmonics;
pub mod predictor;
pub mod renderer;
pub mod search;
pub mod station;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::TideError;
pub use predictor::TideCalc;
pub use station::{Station, Units};

/// A single predicted height at a time relative to "now".
///
/// Sized for small targets:
/// - `i16` for time (±720 minutes = ±12 hours fits in 16 bits)
/// - `f32` for height (station units, feet or meters)
///
/// # Example
/// ```
/// use tide_calc_lib::Sample;
///
/// // Current tide height
/// let now_sample = Sample { mins_rel: 0, height: 3.2 };
///
/// // Tide 2 hours ago
/// let past_sample = Sample { mins_rel: -120, height: 1.8 };
/// assert!(past_sample.mins_rel < now_sample.mins_rel);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Minutes relative to current time (negative = past)
    pub mins_rel: i16,
    /// Height above chart datum
    pub height: f32,
}

/// A window of the predicted tide curve.
///
/// `datum` travels with the samples so renderers can switch between chart
/// datum and mean sea level without access to the station.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TideSeries {
    /// Samples in chronological order
    pub samples: Vec<Sample>,
    /// Mean sea level above chart datum
    pub datum: f32,
    pub units: Units,
}

/// Whether a turning point is high or low water.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TideKind {
    High,
    Low,
}

/// A predicted high or low tide.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideEvent {
    /// Local standard time, rounded to the minute
    pub time: NaiveDateTime,
    /// Height above chart datum
    pub height: f32,
    pub kind: TideKind,
}
