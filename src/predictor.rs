//! # Tide Calculator
//!
//! [`TideCalc`] is the public face of the crate. It owns a validated
//! [`Station`] and turns clock readings into heights, high/low tide times,
//! and sampled curves.
//!
//! ## Time Handling
//! Inputs and outputs are `NaiveDateTime` values in the station's local
//! standard time, the way a battery-backed RTC is normally set. Internally
//! every reading becomes hours since 1 January 00:00 UTC of the UTC year it
//! falls in, which is the reference the yearly constituent tables use.
//!
//! ## Year Boundaries
//! A height is evaluated with the table row of its instant's UTC year. A
//! turning-point search binds one year's row where it starts and keeps
//! evaluating it past 31 December; the next search picks up the new row.
//! Within [`EDGE_HOURS`] of either end of the tables the nearest row is used
//! with a negative hour offset (or one past the year's end), so local days at
//! the edges stay predictable for stations east or west of Greenwich.

use crate::calendar::{
    day_of_year, hours_since_year_start, instant_from_hours, local_to_utc, utc_to_local, utc_year,
    year_start,
};
use crate::constituents::{last_year, year_index, FIRST_YEAR};
use crate::error::TideError;
use crate::harmonics::HarmonicModel;
use crate::search::{next_turning_point, MINUTE};
use crate::station::{Station, Units};
use crate::{Sample, TideEvent, TideKind, TideSeries};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use tracing::debug;

/// Upper bound on turning points reported for one day (semidiurnal: 4, rarely 5)
const MAX_EVENTS_PER_DAY: usize = 6;

/// How far outside the tabulated years an instant may fall and still be
/// evaluated with the nearest year's row
pub const EDGE_HOURS: f64 = 24.0;

/// Half-hourly samples in a daily curve
pub const DAILY_CURVE_POINTS: usize = 48;

/// Harmonic tide predictor for a single station.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tide_calc_lib::TideCalc;
///
/// let calc = TideCalc::default();
/// let now = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let height = calc.current_tide(now).unwrap();
/// assert!(height > -1.0 && height < 6.0);
/// ```
#[derive(Clone, Debug)]
pub struct TideCalc {
    station: Station,
}

impl TideCalc {
    /// Build a predictor after checking the station tables.
    pub fn new(station: Station) -> Result<Self, TideError> {
        station.validate()?;
        Ok(TideCalc { station })
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    /// Station name, e.g. "Lege Cap Ferret, Gironde".
    pub fn station_name(&self) -> &str {
        &self.station.name
    }

    /// Agency station number.
    pub fn station_id_number(&self) -> i64 {
        self.station.id_number
    }

    /// Mean sea level above chart datum.
    pub fn datum(&self) -> f32 {
        self.station.datum
    }

    pub fn units(&self) -> Units {
        self.station.units
    }

    /// Predicted height above chart datum for a local standard time reading.
    pub fn current_tide(&self, now: NaiveDateTime) -> Result<f32, TideError> {
        self.height_at(local_to_utc(now, self.station.utc_offset_hours))
    }

    /// Predicted height above chart datum at a UTC instant.
    pub fn height_at(&self, instant: DateTime<Utc>) -> Result<f32, TideError> {
        let (model, hours) = self.locate(instant)?;
        Ok(model.height(hours) as f32)
    }

    /// Rate of change in station units per hour at a local standard time reading.
    pub fn rate_at(&self, now: NaiveDateTime) -> Result<f32, TideError> {
        let (model, hours) = self.locate(local_to_utc(now, self.station.utc_offset_hours))?;
        Ok(model.rate(hours) as f32)
    }

    /// Model and hour offset for an instant, using the instant's UTC year.
    fn locate(&self, instant: DateTime<Utc>) -> Result<(HarmonicModel<'_>, f64), TideError> {
        let year = table_year(instant)?;
        let model = HarmonicModel::new(&self.station, year)?;
        Ok((model, hours_since_year_start(instant, year)))
    }

    /// First high or low tide at or after `from` (local standard time).
    pub fn next_event(&self, from: NaiveDateTime) -> Result<TideEvent, TideError> {
        let (model, hours) = self.locate(local_to_utc(from, self.station.utc_offset_hours))?;
        let turn = next_turning_point(&model, hours)?;
        Ok(self.event_at(&model, turn))
    }

    /// High and low tides falling on a local calendar day.
    ///
    /// Takes raw calendar fields so values read straight off an RTC are
    /// validated here; an impossible date yields [`TideError::InvalidDate`].
    pub fn tide_events(
        &self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Vec<TideEvent>, TideError> {
        let start = self.local_midnight(year, month, day)?;
        let end = start + Duration::days(1);

        let mut events = Vec::with_capacity(MAX_EVENTS_PER_DAY);
        let mut from = start;
        while events.len() < MAX_EVENTS_PER_DAY {
            let event = self.next_event(from)?;
            if event.time >= end {
                break;
            }
            debug!(time = %event.time, kind = ?event.kind, height = event.height, "tide event");
            // Skip past the turn so the scan does not land on it again
            from = event.time + Duration::minutes(2);
            events.push(event);
        }
        Ok(events)
    }

    /// Heights every half hour from local midnight, 48 values.
    pub fn daily_curve(&self, year: i32, month: u32, day: u32) -> Result<Vec<f32>, TideError> {
        let start = self.local_midnight(year, month, day)?;
        (0..DAILY_CURVE_POINTS as i64)
            .map(|i| self.current_tide(start + Duration::minutes(30 * i)))
            .collect()
    }

    /// Sampled curve centred on `center`, covering ±`window_hours` in
    /// `step_minutes` increments. The sample with `mins_rel == 0` is `center`.
    pub fn predict_series(
        &self,
        center: NaiveDateTime,
        window_hours: i64,
        step_minutes: i64,
    ) -> Result<TideSeries, TideError> {
        let invalid = TideError::InvalidWindow {
            window_hours,
            step_minutes,
        };
        let span = match window_hours.checked_mul(60) {
            Some(span) if window_hours > 0 && step_minutes > 0 && span <= i16::MAX as i64 => span,
            _ => return Err(invalid),
        };

        let count = (2 * span / step_minutes + 1) as usize;
        let mut samples = Vec::with_capacity(count);
        for mins in (-span..=span).step_by(step_minutes as usize) {
            let height = self.current_tide(center + Duration::minutes(mins))?;
            samples.push(Sample {
                mins_rel: mins as i16,
                height,
            });
        }

        Ok(TideSeries {
            samples,
            datum: self.station.datum,
            units: self.station.units,
        })
    }

    fn local_midnight(&self, year: i32, month: u32, day: u32) -> Result<NaiveDateTime, TideError> {
        day_of_year(day, month, year)?;
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or(TideError::InvalidDate { year, month, day })
    }

    /// Classify a turning point and convert it back to local time.
    fn event_at(&self, model: &HarmonicModel<'_>, hours: f64) -> TideEvent {
        let kind = if model.rising(hours - MINUTE) {
            TideKind::High
        } else {
            TideKind::Low
        };
        let instant = instant_from_hours(hours, model.year());
        TideEvent {
            time: round_to_minute(utc_to_local(instant, self.station.utc_offset_hours)),
            height: model.height(hours) as f32,
            kind,
        }
    }
}

impl Default for TideCalc {
    fn default() -> Self {
        TideCalc {
            station: Station::lege_cap_ferret(),
        }
    }
}

/// Table year for an instant: its UTC year, or the first/last tabulated
/// year when the instant lies within [`EDGE_HOURS`] outside the tables.
fn table_year(instant: DateTime<Utc>) -> Result<i32, TideError> {
    let year = utc_year(instant);
    let err = match year_index(year) {
        Ok(_) => return Ok(year),
        Err(err) => err,
    };

    let nearest = year.clamp(FIRST_YEAR, last_year());
    let hours = hours_since_year_start(instant, nearest);
    let year_hours = hours_since_year_start(year_start(nearest + 1), nearest);
    if (-EDGE_HOURS..=year_hours + EDGE_HOURS).contains(&hours) {
        debug!(year, nearest, hours, "evaluating outside tables with nearest year");
        Ok(nearest)
    } else {
        Err(err)
    }
}

fn round_to_minute(time: NaiveDateTime) -> NaiveDateTime {
    let floored = time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time);
    if time.second() >= 30 {
        floored + Duration::minutes(1)
    } else {
        floored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_station_metadata() {
        let calc = TideCalc::default();
        assert_eq!(calc.station_name(), "Lege Cap Ferret, Gironde");
        assert_eq!(calc.station_id_number(), 1000);
        assert_eq!(calc.datum(), 2.38);
        assert_eq!(calc.units(), Units::Meters);
    }

    #[test]
    fn test_new_rejects_invalid_station() {
        let mut station = Station::lege_cap_ferret();
        station.phases.truncate(10);
        assert!(TideCalc::new(station).is_err());
    }

    #[test]
    fn test_current_tide_uses_local_standard_time() {
        let calc = TideCalc::default();
        let local = at(2019, 6, 1, 12, 0);
        let utc = local_to_utc(local, 1.0);
        assert_eq!(calc.current_tide(local).unwrap(), calc.height_at(utc).unwrap());
    }

    #[test]
    fn test_current_tide_out_of_table_years() {
        let calc = TideCalc::default();
        assert!(matches!(
            calc.current_tide(at(2014, 6, 1, 0, 0)),
            Err(TideError::YearOutOfRange { year: 2014, .. })
        ));
        assert!(calc.current_tide(at(2026, 6, 1, 0, 0)).is_err());
    }

    #[test]
    fn test_height_is_continuous_across_new_year() {
        // Table rows switch at midnight UTC; neighbouring minutes must agree closely
        let calc = TideCalc::default();
        let before = calc.current_tide(at(2018, 1, 1, 0, 59)).unwrap();
        let after = calc.current_tide(at(2018, 1, 1, 1, 1)).unwrap();
        assert!((before - after).abs() < 0.1, "{before} vs {after}");
    }

    #[test]
    fn test_tide_events_alternate_within_the_day() {
        let calc = TideCalc::default();
        let events = calc.tide_events(2017, 3, 15).unwrap();
        assert!((3..=5).contains(&events.len()), "got {} events", events.len());

        let start = at(2017, 3, 15, 0, 0);
        for e in &events {
            assert!(e.time >= start && e.time < start + Duration::days(1));
            assert_eq!(e.time.second(), 0);
        }
        for pair in events.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
            assert!(pair[0].time < pair[1].time);
        }
    }

    #[test]
    fn test_highs_above_datum_and_lows_below() {
        let calc = TideCalc::default();
        for e in calc.tide_events(2020, 9, 1).unwrap() {
            match e.kind {
                TideKind::High => assert!(e.height > calc.datum()),
                TideKind::Low => assert!(e.height < calc.datum()),
            }
        }
    }

    #[test]
    fn test_event_heights_are_local_extrema() {
        let calc = TideCalc::default();
        for e in calc.tide_events(2022, 7, 4).unwrap() {
            let before = calc.current_tide(e.time - Duration::minutes(20)).unwrap();
            let after = calc.current_tide(e.time + Duration::minutes(20)).unwrap();
            match e.kind {
                TideKind::High => assert!(e.height >= before && e.height >= after),
                TideKind::Low => assert!(e.height <= before && e.height <= after),
            }
        }
    }

    #[test]
    fn test_tide_events_reject_invalid_dates() {
        let calc = TideCalc::default();
        assert!(matches!(
            calc.tide_events(2019, 2, 29),
            Err(TideError::InvalidDate { .. })
        ));
        assert!(calc.tide_events(2019, 13, 1).is_err());
    }

    #[test]
    fn test_daily_curve_has_48_points_from_midnight() {
        let calc = TideCalc::default();
        let curve = calc.daily_curve(2021, 11, 20).unwrap();
        assert_eq!(curve.len(), DAILY_CURVE_POINTS);
        assert_eq!(curve[0], calc.current_tide(at(2021, 11, 20, 0, 0)).unwrap());
        assert_eq!(curve[47], calc.current_tide(at(2021, 11, 20, 23, 30)).unwrap());
    }

    #[test]
    fn test_predict_series_window() {
        let calc = TideCalc::default();
        let center = at(2023, 5, 10, 8, 0);
        let series = calc.predict_series(center, 12, 10).unwrap();
        assert_eq!(series.samples.len(), 145);
        assert_eq!(series.samples.first().unwrap().mins_rel, -720);
        assert_eq!(series.samples.last().unwrap().mins_rel, 720);
        let now = series.samples.iter().find(|s| s.mins_rel == 0).unwrap();
        assert_eq!(now.height, calc.current_tide(center).unwrap());
        assert!(calc.predict_series(center, 0, 10).is_err());
    }

    /// Built-in station moved eight hours west of Greenwich
    fn pacific_station() -> Station {
        Station {
            utc_offset_hours: -8.0,
            ..Station::lege_cap_ferret()
        }
    }

    #[test]
    fn test_first_table_day_east_of_greenwich() {
        // Local midnight on 1 January 2015 is still 2014 in UTC
        let calc = TideCalc::default();
        let height = calc.current_tide(at(2015, 1, 1, 0, 30)).unwrap();
        assert!((-1.0..6.0).contains(&height));

        let events = calc.tide_events(2015, 1, 1).unwrap();
        assert!((3..=5).contains(&events.len()), "got {} events", events.len());
        assert_eq!(calc.daily_curve(2015, 1, 1).unwrap().len(), DAILY_CURVE_POINTS);

        // Same table row on both sides of midnight UTC, so no jump at all
        let before = calc.current_tide(at(2015, 1, 1, 0, 59)).unwrap();
        let after = calc.current_tide(at(2015, 1, 1, 1, 1)).unwrap();
        assert!((before - after).abs() < 0.05, "{before} vs {after}");
    }

    #[test]
    fn test_last_table_day_west_of_greenwich() {
        // Local late evening on 31 December 2024 is already 2025 in UTC
        let calc = TideCalc::new(pacific_station()).unwrap();
        assert!(calc.current_tide(at(2024, 12, 31, 20, 0)).is_ok());
        let events = calc.tide_events(2024, 12, 31).unwrap();
        assert!((3..=5).contains(&events.len()), "got {} events", events.len());
        assert_eq!(calc.daily_curve(2024, 12, 31).unwrap().len(), DAILY_CURVE_POINTS);

        let calc = TideCalc::default();
        assert!(calc.tide_events(2024, 12, 31).is_ok());
        assert!(calc.predict_series(at(2024, 12, 31, 14, 0), 12, 10).is_ok());
    }

    #[test]
    fn test_edge_allowance_is_bounded() {
        let calc = TideCalc::default();
        assert!(matches!(
            calc.current_tide(at(2014, 12, 30, 12, 0)),
            Err(TideError::YearOutOfRange { year: 2014, .. })
        ));
        assert!(matches!(
            calc.current_tide(at(2025, 1, 3, 0, 0)),
            Err(TideError::YearOutOfRange { year: 2025, .. })
        ));
    }

    #[test]
    fn test_next_event_runs_across_new_year() {
        // Search starts in 2017 tables and finds a turn in 2018
        let calc = TideCalc::default();
        let from = at(2017, 12, 31, 23, 0);
        let event = calc.next_event(from).unwrap();
        assert!(event.time > from);
        assert!(event.time < from + Duration::hours(8));

        let direct = calc.current_tide(event.time).unwrap();
        assert!((direct - event.height).abs() < 0.05, "{direct} vs {}", event.height);

        let events = calc.tide_events(2017, 12, 31).unwrap();
        for pair in events.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }

    #[test]
    fn test_tide_events_capped_per_day() {
        // M8 alone turns every ~1.55 hours, about 15 times a day
        let mut amplitudes = vec![0.0; crate::constituents::CONSTITUENT_COUNT];
        amplitudes[crate::constituents::index_of("M8").unwrap()] = 1.0;
        let station = Station {
            amplitudes,
            ..Station::lege_cap_ferret()
        };
        let calc = TideCalc::new(station).unwrap();

        let events = calc.tide_events(2019, 5, 5).unwrap();
        assert_eq!(events.len(), MAX_EVENTS_PER_DAY);
        for pair in events.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
            assert!(pair[1].time - pair[0].time < Duration::hours(2));
        }
    }

    #[test]
    fn test_predict_series_rejects_overflowing_window() {
        let calc = TideCalc::default();
        let center = at(2023, 5, 10, 8, 0);
        for (hours, step) in [(i64::MAX, 10), (i64::MAX / 2, 10), (1000, 10), (12, 0), (-1, 10)] {
            assert!(matches!(
                calc.predict_series(center, hours, step),
                Err(TideError::InvalidWindow { .. })
            ));
        }
    }

    #[test]
    fn test_round_to_minute() {
        let t = at(2019, 1, 1, 10, 15) + Duration::seconds(31);
        assert_eq!(round_to_minute(t), at(2019, 1, 1, 10, 16));
        let t = at(2019, 1, 1, 10, 15) + Duration::seconds(29);
        assert_eq!(round_to_minute(t), at(2019, 1, 1, 10, 15));
    }
}
