//! Break allocation: convert an aggregate break duration into one or two
//! discrete, time-anchored intervals.
//!
//! Pure function, no I/O. Used by the import pipeline when a legacy record
//! only says "45 minutes of breaks" without saying when.
//!
//! Rules:
//! - everything is snapped to the 15-minute grid (nearest, ties up) first;
//! - up to 30 minutes → one break, preferring to center it on 13:00, then
//!   10:00, then the period edge closest to either anchor;
//! - 45 to 60 minutes → two breaks, the larger (ceil half) anchored at
//!   13:00, the smaller at 10:00; overlaps push the later break forward;
//! - durations rounding above 60 are clamped to 60.

use crate::models::payload::BreakInterval;
use crate::utils::time::{from_minutes, round_quarter, snap_to_quarter, to_minutes};
use chrono::NaiveTime;

const LUNCH_ANCHOR: i64 = 13 * 60;
const MORNING_ANCHOR: i64 = 10 * 60;
const MAX_TOTAL: i64 = 60;

pub const IMPORT_REASON: &str = "Imported";

/// Center a break on `anchor`, then pull it back inside the period.
fn center_on(anchor: i64, duration: i64, start: i64, finish: i64) -> (i64, i64) {
    let mut s = round_quarter(anchor - duration / 2);
    let mut e = s + duration;

    if e > finish {
        s -= e - finish;
        e = finish;
    }
    if s < start {
        e = (e + (start - s)).min(finish);
        s = start;
    }
    (s, e)
}

/// Place `duration` minutes against the first anchor the period spans, or
/// at the period edge numerically closest to any of the anchors.
fn place(duration: i64, anchors: &[i64], start: i64, finish: i64) -> (i64, i64) {
    for &anchor in anchors {
        if start <= anchor && anchor <= finish {
            return center_on(anchor, duration, start, finish);
        }
    }

    let dist = |t: i64| anchors.iter().map(|a| (t - a).abs()).min().unwrap_or(i64::MAX);
    if dist(start) <= dist(finish) {
        (start, (start + duration).min(finish))
    } else {
        ((finish - duration).max(start), finish)
    }
}

/// Allocate `total_minutes` of break time inside `[period_start, period_finish]`.
/// Returns chronologically ordered intervals tagged with the import reason.
pub fn allocate_breaks(
    total_minutes: i64,
    period_start: NaiveTime,
    period_finish: NaiveTime,
) -> Vec<BreakInterval> {
    let start = to_minutes(snap_to_quarter(period_start));
    let finish = to_minutes(snap_to_quarter(period_finish));
    if finish <= start {
        return Vec::new();
    }

    let total = round_quarter(total_minutes).min(MAX_TOTAL);
    if total <= 0 {
        return Vec::new();
    }

    let mut spans: Vec<(i64, i64)> = Vec::new();

    if total <= 30 {
        spans.push(place(total, &[LUNCH_ANCHOR, MORNING_ANCHOR], start, finish));
    } else {
        // ceil half on the 15-minute grid: 45 → 30/15, 60 → 30/30
        let larger = ((total / 2 + 14) / 15) * 15;
        let smaller = total - larger;

        let lunch = place(larger, &[LUNCH_ANCHOR], start, finish);
        let morning = place(smaller, &[MORNING_ANCHOR], start, finish);

        let (first, mut second) = if lunch.0 <= morning.0 {
            (lunch, morning)
        } else {
            (morning, lunch)
        };

        // anchoring collided: shift the later break forward by the overlap
        if second.0 < first.1 {
            let overlap = first.1 - second.0;
            second.0 += overlap;
            second.1 += overlap;
            if second.1 > finish {
                let back = second.1 - finish;
                second.0 = (second.0 - back).max(first.1);
                second.1 = finish;
            }
        }

        spans.push(first);
        if second.1 > second.0 {
            spans.push(second);
        }
    }

    spans.sort();
    spans
        .into_iter()
        .filter(|(s, e)| e > s)
        .enumerate()
        .map(|(i, (s, e))| BreakInterval {
            start: from_minutes(s),
            finish: from_minutes(e),
            reason: IMPORT_REASON.to_string(),
            position: i as i32,
        })
        .collect()
}
