mod common;

use common::time;
use fieldsync::core::breaks::{allocate_breaks, IMPORT_REASON};

#[test]
fn test_half_hour_centers_on_lunch_anchor() {
    let breaks = allocate_breaks(30, time("09:00"), time("13:30"));

    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].start, time("12:45"));
    assert_eq!(breaks[0].finish, time("13:15"));
    assert_eq!(breaks[0].reason, IMPORT_REASON);
    assert_eq!(breaks[0].position, 0);
}

#[test]
fn test_forty_five_splits_across_both_anchors() {
    let breaks = allocate_breaks(45, time("08:00"), time("17:00"));

    assert_eq!(breaks.len(), 2);
    // chronological order: smaller break at the morning anchor first
    assert_eq!(breaks[0].start, time("10:00"));
    assert_eq!(breaks[0].finish, time("10:15"));
    assert_eq!(breaks[1].start, time("12:45"));
    assert_eq!(breaks[1].finish, time("13:15"));
    assert_eq!(breaks[0].position, 0);
    assert_eq!(breaks[1].position, 1);
}

#[test]
fn test_period_outside_anchors_uses_nearest_edge() {
    // afternoon-only period: neither anchor is spanned, the start edge is
    // closer to 13:00 than the finish edge is
    let breaks = allocate_breaks(15, time("14:00"), time("18:00"));

    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].start, time("14:00"));
    assert_eq!(breaks[0].finish, time("14:15"));
}

#[test]
fn test_zero_and_negative_durations_yield_nothing() {
    assert!(allocate_breaks(0, time("08:00"), time("17:00")).is_empty());
    assert!(allocate_breaks(-30, time("08:00"), time("17:00")).is_empty());
}

#[test]
fn test_degenerate_period_yields_nothing() {
    assert!(allocate_breaks(30, time("13:00"), time("13:00")).is_empty());
    assert!(allocate_breaks(30, time("14:00"), time("13:00")).is_empty());
}

#[test]
fn test_duration_rounds_to_quarter_hour_grid() {
    // 20 minutes rounds down to one 15-minute break
    let breaks = allocate_breaks(20, time("09:00"), time("17:00"));
    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].start, time("13:00"));
    assert_eq!(breaks[0].finish, time("13:15"));

    // 40 minutes rounds up to 45 and splits in two
    let breaks = allocate_breaks(40, time("08:00"), time("17:00"));
    assert_eq!(breaks.len(), 2);
    assert_eq!(breaks[0].start, time("10:00"));
    assert_eq!(breaks[0].finish, time("10:15"));
    assert_eq!(breaks[1].start, time("12:45"));
    assert_eq!(breaks[1].finish, time("13:15"));
}

#[test]
fn test_total_is_clamped_to_one_hour() {
    let breaks = allocate_breaks(75, time("08:00"), time("17:00"));

    let total: i64 = breaks.iter().map(|b| b.duration_minutes()).sum();
    assert_eq!(total, 60);
    assert_eq!(breaks.len(), 2);
    assert_eq!(breaks[0].start, time("09:45"));
    assert_eq!(breaks[0].finish, time("10:15"));
    assert_eq!(breaks[1].start, time("12:45"));
    assert_eq!(breaks[1].finish, time("13:15"));
}

#[test]
fn test_colliding_breaks_shift_the_later_one_forward() {
    // one hour of breaks in a one-hour period: both halves must fit
    // back to back without overlapping
    let breaks = allocate_breaks(60, time("12:30"), time("13:30"));

    assert_eq!(breaks.len(), 2);
    assert_eq!(breaks[0].start, time("12:30"));
    assert_eq!(breaks[0].finish, time("13:00"));
    assert_eq!(breaks[1].start, time("13:00"));
    assert_eq!(breaks[1].finish, time("13:30"));
}

#[test]
fn test_break_is_pulled_back_inside_the_period() {
    // centering on 13:00 would spill past the finish; the break slides back
    let breaks = allocate_breaks(30, time("09:00"), time("13:00"));

    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].start, time("12:30"));
    assert_eq!(breaks[0].finish, time("13:00"));
}

#[test]
fn test_breaks_are_chronological_and_positions_sequential() {
    let breaks = allocate_breaks(60, time("07:00"), time("16:00"));

    assert_eq!(breaks.len(), 2);
    assert!(breaks[0].finish <= breaks[1].start);
    assert_eq!(breaks[0].position, 0);
    assert_eq!(breaks[1].position, 1);
}
