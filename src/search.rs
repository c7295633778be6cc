//! # Turning-Point Search
//!
//! High and low water occur where the rate of change crosses zero. Rather than
//! solving for roots of the derivative, the search walks forward in half-hour
//! steps until the tide changes direction, then backs up a minute at a time to
//! pin the change to the nearest minute. On a semidiurnal coast consecutive
//! turning points are ~6 hours apart, so a half-hour stride never jumps a pair.

use crate::error::TideError;
use crate::harmonics::HarmonicModel;
use tracing::debug;

/// One minute expressed in hours
pub const MINUTE: f64 = 1.0 / 60.0;

/// Forward stride of the coarse scan, in hours
const COARSE_STEP: f64 = 0.5;

/// The coarse scan gives up after this many hours without a direction change.
///
/// Longer than a lunar day so diurnal stations (one high, one low) still resolve.
pub const MAX_SEARCH_HOURS: f64 = 26.0;

/// Find the first high or low tide at or after `t0` (hours since year start, GMT).
///
/// Returns `t0` itself when the tide turns in the half minute before it.
/// The result is accurate to one minute.
pub fn next_turning_point(model: &HarmonicModel<'_>, t0: f64) -> Result<f64, TideError> {
    let start_dir = model.rising(t0);
    if model.rising(t0 - 0.5 * MINUTE) != start_dir {
        return Ok(t0);
    }

    // Coarse scan: half-hour steps until the direction flips
    let max_steps = (MAX_SEARCH_HOURS / COARSE_STEP) as usize;
    let mut t = t0;
    let mut dir = start_dir;
    for _ in 0..max_steps {
        t += COARSE_STEP;
        dir = model.rising(t);
        if dir != start_dir {
            break;
        }
    }
    if dir == start_dir {
        return Err(TideError::NoTurningPoint { after_hours: t0 });
    }

    // Fine scan: back up minute by minute while still in the new direction
    let new_dir = dir;
    while dir == new_dir {
        t -= MINUTE;
        dir = model.rising(t);
    }

    // t is the last whole minute in the old direction; round up if the
    // turn happens in the first half of the following minute
    if model.rising(t + 0.5 * MINUTE) == dir {
        t += MINUTE;
    }

    debug!(t0, turning_point = t, "located turning point");
    Ok(t)
}
