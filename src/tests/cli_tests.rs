//! Command line parsing tests.

use crate::{parse_args, parse_time, render_text, Options};
use chrono::NaiveDate;
use tide_calc_lib::config::DisplayConfig;
use tide_calc_lib::TideCalc;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn no_arguments_use_defaults() {
    assert_eq!(parse_args(args(&[])).unwrap(), Options::default());
}

#[test]
fn all_flags_are_recognised() {
    let options = parse_args(args(&[
        "--at",
        "2019-06-01 12:30",
        "--config",
        "site.toml",
        "--chart",
        "--json",
    ]))
    .unwrap();

    let expected = NaiveDate::from_ymd_opt(2019, 6, 1)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();
    assert_eq!(options.at, Some(expected));
    assert_eq!(options.config.as_deref(), Some("site.toml"));
    assert!(options.chart);
    assert!(options.json);
}

#[test]
fn iso_timestamps_are_accepted() {
    let t = parse_time("2020-02-29T23:59:00").unwrap();
    assert_eq!(t.to_string(), "2020-02-29 23:59:00");
}

#[test]
fn bad_input_is_reported() {
    assert!(parse_time("yesterday").is_err());
    assert!(parse_time("2019-02-30 10:00").is_err());
    assert!(parse_args(args(&["--at"])).is_err());
    assert!(parse_args(args(&["--stdout"])).is_err());
}

/// The last day of the tables still reports its tides; a chart window that
/// reaches past the tables is dropped instead of failing the whole report.
#[test]
fn report_survives_chart_window_past_tables() {
    let calc = TideCalc::default();
    let now = parse_time("2024-12-31 14:00").unwrap();
    let height = calc.current_tide(now).unwrap();
    let events = calc.tide_events(2024, 12, 31).unwrap();

    let wide = DisplayConfig {
        window_hours: 48,
        ..DisplayConfig::default()
    };
    assert!(calc.predict_series(now, 48, 10).is_err());

    let text = render_text(&calc, now, height, &events, &wide, true);
    assert!(text.starts_with("Lege Cap Ferret, Gironde (#1000)"));
    assert!(text.contains("2024-12-31 14:00"));
    assert!(text.contains("High"));
    assert!(!text.contains('X'));

    let text = render_text(&calc, now, height, &events, &DisplayConfig::default(), true);
    assert_eq!(text.matches('X').count(), 1);

    let text = render_text(&calc, now, height, &events, &wide, false);
    assert!(text.contains("Low"));
}
