//! # Tide Calculator Entry Point
//!
//! Prints the predicted tide for the configured station: current height,
//! the day's high and low tides, and optionally an ASCII chart or a JSON
//! report.
//!
//! ```text
//! tide-calc [--at "YYYY-MM-DD HH:MM"] [--config PATH] [--chart] [--json]
//! ```
//!
//! Times given with `--at` are station local standard time. Without it the
//! system clock is used.

#[cfg(test)]
mod tests;

use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDateTime};
use std::env;
use tide_calc_lib::config::DisplayConfig;
use tide_calc_lib::renderer::{render_ascii, render_events, render_json, Report};
use tide_calc_lib::{Clock, Config, FixedClock, SystemClock, TideCalc, TideEvent};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct Options {
    at: Option<NaiveDateTime>,
    config: Option<String>,
    chart: bool,
    json: bool,
}

/// Accepted `--at` formats
const TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

fn parse_time(text: &str) -> anyhow::Result<NaiveDateTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text.trim(), fmt).ok())
        .with_context(|| format!("unrecognised time '{text}', expected YYYY-MM-DD HH:MM"))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--at" => {
                let value = args.next().context("--at needs a time")?;
                options.at = Some(parse_time(&value)?);
            }
            "--config" => {
                options.config = Some(args.next().context("--config needs a path")?);
            }
            "--chart" => options.chart = true,
            "--json" => options.json = true,
            other => bail!("unknown argument '{other}'"),
        }
    }
    Ok(options)
}

/// Plain-text report: station, current height, the day's tides and, when
/// asked for, the chart. A chart window that runs past the tables is left
/// out with a warning rather than failing the report.
fn render_text(
    calc: &TideCalc,
    now: NaiveDateTime,
    height: f32,
    events: &[TideEvent],
    display: &DisplayConfig,
    chart: bool,
) -> String {
    let mut out = format!("{} (#{})\n", calc.station_name(), calc.station_id_number());
    out.push_str(&format!(
        "{}  {:.2} {}\n\n",
        now.format("%Y-%m-%d %H:%M"),
        height,
        calc.units()
    ));
    out.push_str(&render_events(events, calc.datum(), calc.units(), display));

    if chart {
        match calc.predict_series(now, display.window_hours, display.step_minutes) {
            Ok(series) => {
                out.push('\n');
                out.push_str(&render_ascii(&series, display));
            }
            Err(e) => warn!(error = %e, "chart skipped"),
        }
    }
    out
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays machine-readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let options = parse_args(env::args().skip(1))?;
    debug!(?options, "parsed arguments");

    let config = match &options.config {
        Some(path) => Config::try_load_from_path(path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => Config::load(),
    };

    let calc = TideCalc::new(config.station()).context("station tables rejected")?;
    let clock: Box<dyn Clock> = match options.at {
        Some(at) => Box::new(FixedClock(at)),
        None => Box::new(SystemClock::new(calc.station().utc_offset_hours)),
    };
    let now = clock.now();
    info!(station = calc.station_name(), %now, "predicting");

    let height = calc
        .current_tide(now)
        .with_context(|| format!("no prediction for {now}"))?;
    let events = calc.tide_events(now.year(), now.month(), now.day())?;

    if options.json {
        let report = Report {
            station: calc.station_name(),
            station_id: calc.station_id_number(),
            time: now,
            height,
            units: calc.units().suffix(),
            events: &events,
        };
        println!("{}", render_json(&report)?);
        return Ok(());
    }

    print!(
        "{}",
        render_text(&calc, now, height, &events, &config.display, options.chart)
    );
    Ok(())
}
