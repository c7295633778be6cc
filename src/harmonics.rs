//! # Harmonic Summation
//!
//! The predicted water level is a sum of cosines, one per constituent:
//!
//! ```text
//! h(t) = datum + Σ f·A·cos(a·t + V₀u − κ)
//! ```
//!
//! - `f`, `V₀u`: node factor and equilibrium argument for the year
//! - `A`, `κ`: station amplitude and phase lag
//! - `a`: constituent speed in degrees per hour
//! - `t`: hours since 1 January 00:00 UTC of the same year
//!
//! Its time derivative `−Σ f·A·a·sin(...)` tells whether the tide is rising
//! or falling, which is all the turning-point search needs.

use crate::constituents::{year_index, EQUILARG, NODEFACTOR, SPEED};
use crate::error::TideError;
use crate::station::Station;

/// A station bound to one year's equilibrium arguments and node factors.
///
/// Borrowed, cheap to build, and valid only for hour offsets measured from
/// the start of `year`.
#[derive(Clone, Copy, Debug)]
pub struct HarmonicModel<'a> {
    station: &'a Station,
    year: i32,
    row: usize,
}

impl<'a> HarmonicModel<'a> {
    /// Bind `station` to the tables for `year`.
    pub fn new(station: &'a Station, year: i32) -> Result<Self, TideError> {
        let row = year_index(year)?;
        Ok(HarmonicModel { station, year, row })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn station(&self) -> &'a Station {
        self.station
    }

    /// Phase angle of constituent `i` at `hours`, in radians.
    fn argument(&self, i: usize, phase: f32, hours: f64) -> f64 {
        let speed = SPEED[i] as f64;
        let equilarg = EQUILARG[self.row][i] as f64;
        (speed * hours + equilarg - phase as f64).to_radians()
    }

    /// Water level above chart datum at `hours` since the start of the year (GMT).
    pub fn height(&self, hours: f64) -> f64 {
        let mut height = self.station.datum as f64;
        for (i, amp, phase) in self.station.active_constituents() {
            let node = NODEFACTOR[self.row][i] as f64;
            height += node * amp as f64 * self.argument(i, phase, hours).cos();
        }
        height
    }

    /// Rate of change of the water level in station units per hour.
    pub fn rate(&self, hours: f64) -> f64 {
        let mut rate = 0.0;
        for (i, amp, phase) in self.station.active_constituents() {
            let node = NODEFACTOR[self.row][i] as f64;
            let speed = (SPEED[i] as f64).to_radians();
            rate -= node * amp as f64 * speed * self.argument(i, phase, hours).sin();
        }
        rate
    }

    /// True when the tide is rising or slack at `hours`.
    pub fn rising(&self, hours: f64) -> bool {
        self.rate(hours) >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constituents::CONSTITUENT_COUNT;
    use crate::station::Units;

    /// Station with a single constituent of amplitude 1 and zero phase lag
    fn single(name: &str) -> Station {
        let idx = crate::constituents::index_of(name).unwrap();
        let mut amplitudes = vec![0.0; CONSTITUENT_COUNT];
        amplitudes[idx] = 1.0;
        Station {
            name: format!("{name} only"),
            id_number: 0,
            datum: 0.0,
            utc_offset_hours: 0.0,
            units: Units::Feet,
            amplitudes,
            phases: vec![0.0; CONSTITUENT_COUNT],
        }
    }

    #[test]
    fn test_zero_amplitudes_give_datum() {
        let mut station = single("M2");
        station.amplitudes = vec![0.0; CONSTITUENT_COUNT];
        station.datum = 3.5;
        let model = HarmonicModel::new(&station, 2017).unwrap();
        for hours in [0.0, 100.5, 4000.25] {
            assert_eq!(model.height(hours), 3.5);
            assert_eq!(model.rate(hours), 0.0);
        }
    }

    #[test]
    fn test_s2_alone_is_a_plain_cosine() {
        // S2 has node factor 1 and equilibrium argument 0 in every year
        let station = single("S2");
        let model = HarmonicModel::new(&station, 2020).unwrap();
        assert!((model.height(0.0) - 1.0).abs() < 1e-9);
        assert!((model.height(3.0) - 0.0).abs() < 1e-9); // 90 degrees
        assert!((model.height(6.0) + 1.0).abs() < 1e-9); // 180 degrees
        assert!((model.height(12.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_matches_finite_difference() {
        let station = Station::lege_cap_ferret();
        let model = HarmonicModel::new(&station, 2018).unwrap();
        let dt = 1e-4;
        for hours in [10.0, 777.7, 5000.0] {
            let numeric = (model.height(hours + dt) - model.height(hours - dt)) / (2.0 * dt);
            assert!(
                (numeric - model.rate(hours)).abs() < 1e-4,
                "rate mismatch at {hours}: {numeric} vs {}",
                model.rate(hours)
            );
        }
    }

    #[test]
    fn test_rising_flips_across_a_crest() {
        let station = single("S2");
        let model = HarmonicModel::new(&station, 2019).unwrap();
        // Crest of S2 at t = 12h
        assert!(model.rising(11.9));
        assert!(!model.rising(12.1));
    }

    #[test]
    fn test_builtin_station_stays_within_nominal_range() {
        let station = Station::lege_cap_ferret();
        let model = HarmonicModel::new(&station, 2016).unwrap();
        let bound = station.nominal_range() as f64; // twice the plain amplitude sum
        for step in 0..2000 {
            let h = model.height(step as f64 * 0.37);
            assert!((h - station.datum as f64).abs() < bound);
        }
    }

    #[test]
    fn test_year_outside_tables_is_rejected() {
        let station = Station::lege_cap_ferret();
        assert!(HarmonicModel::new(&station, 2030).is_err());
    }
}
