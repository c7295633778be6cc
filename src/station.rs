//! # Tide Stations
//!
//! A station is the site-specific half of the harmonic model: amplitude and
//! phase lag (kappa, the "epoch" in NOAA listings) for each of the 37
//! constituents in [`constituents::NAMES`](crate::constituents::NAMES) order,
//! plus the datum offset and the local standard time zone its clock runs in.
//!
//! One station ships built in. Others can be described in `tide-config.toml`
//! and are checked by [`Station::validate`] before use.

use crate::constituents::{CONSTITUENT_COUNT, NAMES};
use crate::error::TideError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length unit of a station's amplitudes and datum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Feet,
    Meters,
}

impl Units {
    /// Short suffix for printed heights
    pub fn suffix(self) -> &'static str {
        match self {
            Units::Feet => "ft",
            Units::Meters => "m",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Harmonic description of a single tide station.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Human-readable station name
    pub name: String,
    /// Agency station number
    pub id_number: i64,
    /// Mean sea level above chart datum, in `units`
    pub datum: f32,
    /// Local standard time minus UTC, in hours (positive east of Greenwich)
    pub utc_offset_hours: f64,
    #[serde(default)]
    pub units: Units,
    /// Constituent amplitudes in `units`
    pub amplitudes: Vec<f32>,
    /// Constituent phase lags in degrees
    pub phases: Vec<f32>,
}

// Lege Cap Ferret, Gironde (France). Heights in meters above chart datum.
#[rustfmt::skip]
const LEGE_AMPLITUDES: [f32; CONSTITUENT_COUNT] = [
    0.0054, 0.0570, 0.1141, 0.0366, 0.0048, 1.2810, 0.0, 0.0710,
    0.0, 0.0, 0.2560, 0.0337, 0.0680, 0.0029, 0.0190, 0.02,
    0.0018, 0.0034, 0.0, 0.422, 0.0, 0.0, 0.0248, 0.009,
    0.0406, 0.0483, 0.0026, 0.0, 0.0, 0.022, 0.051, 0.0,
    0.0, 0.0, 0.0, 0.027, 0.0,
];

#[rustfmt::skip]
const LEGE_PHASES: [f32; CONSTITUENT_COUNT] = [
    92.0, 92.0, 181.0, 139.0, 92.0, 139.0, 0.0, 112.0,
    0.0, 0.0, 127.0, 127.0, 345.0, 92.0, 92.0, 301.0,
    92.0, 181.0, 0.0, 181.0, 0.0, 0.0, 181.0, 181.0,
    127.0, 127.0, 92.0, 0.0, 0.0, 113.0, 172.0, 0.0,
    0.0, 0.0, 0.0, 225.0, 0.0,
];

impl Station {
    /// Lege Cap Ferret, Gironde: the station bundled with the crate.
    pub fn lege_cap_ferret() -> Self {
        Station {
            name: "Lege Cap Ferret, Gironde".to_string(),
            id_number: 1000,
            datum: 2.38,
            utc_offset_hours: 1.0,
            units: Units::Meters,
            amplitudes: LEGE_AMPLITUDES.to_vec(),
            phases: LEGE_PHASES.to_vec(),
        }
    }

    /// Check that the tables line up with the shared constituent order and
    /// hold usable numbers.
    pub fn validate(&self) -> Result<(), TideError> {
        if self.amplitudes.len() != CONSTITUENT_COUNT {
            return Err(TideError::InvalidStation(format!(
                "expected {} amplitudes, got {}",
                CONSTITUENT_COUNT,
                self.amplitudes.len()
            )));
        }
        if self.phases.len() != CONSTITUENT_COUNT {
            return Err(TideError::InvalidStation(format!(
                "expected {} phases, got {}",
                CONSTITUENT_COUNT,
                self.phases.len()
            )));
        }
        if let Some(i) = self
            .amplitudes
            .iter()
            .position(|a| !a.is_finite() || *a < 0.0)
        {
            return Err(TideError::InvalidStation(format!(
                "amplitude for {} must be finite and non-negative",
                NAMES[i]
            )));
        }
        if let Some(i) = self.phases.iter().position(|p| !p.is_finite()) {
            return Err(TideError::InvalidStation(format!(
                "phase for {} must be finite",
                NAMES[i]
            )));
        }
        if !self.datum.is_finite() {
            return Err(TideError::InvalidStation("datum must be finite".into()));
        }
        if !(-14.0..=14.0).contains(&self.utc_offset_hours) {
            return Err(TideError::InvalidStation(format!(
                "utc offset {} outside -14..=14 hours",
                self.utc_offset_hours
            )));
        }
        Ok(())
    }

    /// Constituents with a non-zero amplitude, as `(index, amplitude, phase)`.
    ///
    /// Zero-amplitude constituents contribute nothing, so evaluation skips them.
    pub fn active_constituents(&self) -> impl Iterator<Item = (usize, f32, f32)> + '_ {
        self.amplitudes
            .iter()
            .zip(self.phases.iter())
            .enumerate()
            .filter(|(_, (amp, _))| **amp > 0.0)
            .map(|(i, (amp, phase))| (i, *amp, *phase))
    }

    /// Rough spread between highest and lowest possible water, ignoring node factors.
    pub fn nominal_range(&self) -> f32 {
        2.0 * self.amplitudes.iter().sum::<f32>()
    }
}

impl Default for Station {
    fn default() -> Self {
        Self::lege_cap_ferret()
    }
}
