//! # Tide Data Visualization Rendering
//!
//! Text output for terminals and serial consoles: an ASCII chart of a
//! [`TideSeries`], a table of the day's high and low tides, and a JSON
//! report for scripting.

use crate::config::DisplayConfig;
use crate::{TideEvent, TideKind, TideSeries, Units};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Width reserved on the left of the chart for height labels
const Y_AXIS_WIDTH: usize = 6;

/// Convert a height above chart datum to the value shown to the user.
fn to_display(height: f32, datum: f32, config: &DisplayConfig) -> f32 {
    if config.relative_to_msl {
        height - datum
    } else {
        height
    }
}

/// Format a displayed height; MSL-relative values carry an explicit sign.
fn format_height(value: f32, config: &DisplayConfig) -> String {
    if config.relative_to_msl {
        if value.abs() < 0.05 {
            " 0".to_string()
        } else {
            format!("{:+.1}", value)
        }
    } else {
        format!("{:.1}", value)
    }
}

/// Lowest and highest sample heights above chart datum.
fn bounds(series: &TideSeries) -> (f32, f32) {
    series
        .samples
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), sample| {
            (min.min(sample.height), max.max(sample.height))
        })
}

/// Render a series as an ASCII chart.
///
/// One column per sample, `X` marks the sample at `mins_rel == 0`, and `|`
/// ticks every hour along the bottom.
pub fn render_ascii(series: &TideSeries, config: &DisplayConfig) -> String {
    let rows = config.chart_rows.max(2);
    let sample_count = series.samples.len();
    if sample_count == 0 {
        return String::from("(no samples)\n");
    }

    let (min_h, max_h) = bounds(series);
    let span = (max_h - min_h).max(f32::EPSILON);
    let height_to_row = |h: f32| {
        let normalized = (h - min_h) / span;
        ((1.0 - normalized) * (rows as f32 - 1.0)).round() as usize
    };

    let mut grid = vec![vec![' '; sample_count + Y_AXIS_WIDTH]; rows];

    // Y-axis labels on whole display steps
    let min_display = to_display(min_h, series.datum, config);
    let max_display = to_display(max_h, series.datum, config);
    let step = if max_display - min_display > 4.0 { 1.0 } else { 0.5 };
    let mut label_value = (min_display / step).ceil() * step;
    while label_value <= max_display {
        let height = if config.relative_to_msl {
            label_value + series.datum
        } else {
            label_value
        };
        let row = height_to_row(height).min(rows - 1);
        let label = format!(
            "{:<width$}",
            format_height(label_value, config),
            width = Y_AXIS_WIDTH - 1
        );
        for (i, ch) in label.chars().take(Y_AXIS_WIDTH - 1).enumerate() {
            grid[row][i] = ch;
        }
        grid[row][Y_AXIS_WIDTH - 1] = '│';
        label_value += step;
    }

    for (column, sample) in series.samples.iter().enumerate() {
        let row = height_to_row(sample.height).min(rows - 1);
        grid[row][column + Y_AXIS_WIDTH] = if sample.mins_rel == 0 { 'X' } else { '•' };
    }

    let mut out = String::new();
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    // Hour ticks below the chart
    let padding = " ".repeat(Y_AXIS_WIDTH);
    let ticks: String = series
        .samples
        .iter()
        .map(|s| if s.mins_rel % 60 == 0 { '|' } else { ' ' })
        .collect();
    out.push_str(&padding);
    out.push_str(ticks.trim_end());
    out.push('\n');

    let first = series.samples[0].mins_rel / 60;
    let last = series.samples[sample_count - 1].mins_rel / 60;
    let left = format!("{first:+}h");
    let right = format!("{last:+}h");
    let gap = sample_count.saturating_sub(left.len() + right.len()).max(1);
    out.push_str(&format!("{padding}{left}{:gap$}{right}\n", ""));
    out
}

/// Render high and low tides as one line each, e.g. `High  06:42  3.9 m`.
///
/// `datum` is the station's mean sea level above chart datum, used when the
/// display is relative to MSL.
pub fn render_events(
    events: &[TideEvent],
    datum: f32,
    units: Units,
    config: &DisplayConfig,
) -> String {
    if events.is_empty() {
        return String::from("No high or low tides\n");
    }
    events
        .iter()
        .map(|e| {
            let kind = match e.kind {
                TideKind::High => "High",
                TideKind::Low => "Low ",
            };
            format!(
                "{kind}  {}  {} {}\n",
                e.time.format("%H:%M"),
                format_height(to_display(e.height, datum, config), config),
                units
            )
        })
        .collect()
}

/// Everything the CLI prints, in a serializable shape.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub station: &'a str,
    pub station_id: i64,
    pub time: NaiveDateTime,
    pub height: f32,
    pub units: &'static str,
    pub events: &'a [TideEvent],
}

/// Serialize a report as pretty JSON.
pub fn render_json(report: &Report<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
