//! Capture API: what the UI layer calls while offline.
//!
//! Validates the event, then hands it to the durable queue. A queue write
//! failure propagates so the caller can tell the user the save did not
//! happen.

use crate::core::breaks::allocate_breaks;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queue;
use crate::errors::{AppError, AppResult};
use crate::models::payload::{
    ClockInPayload, ClockOutPayload, EntryPayload, WorkContext, WorkPeriodPayload,
};
use chrono::{NaiveDate, NaiveTime};

pub fn enqueue_work_period(pool: &mut DbPool, payload: WorkPeriodPayload) -> AppResult<i64> {
    if payload.finish <= payload.start {
        return Err(AppError::InvalidTime(format!(
            "finish {} must be later than start {}",
            payload.finish, payload.start
        )));
    }
    for b in &payload.breaks {
        if b.finish <= b.start {
            return Err(AppError::InvalidBreak(format!(
                "break finish {} must be later than start {}",
                b.finish, b.start
            )));
        }
    }

    let id = queue::enqueue(&pool.conn, &EntryPayload::WorkPeriod(payload))?;
    ttlog(&pool.conn, "enqueue", "work_period", &format!("entry {}", id))?;
    Ok(id)
}

pub fn enqueue_clock_in(pool: &mut DbPool, payload: ClockInPayload) -> AppResult<i64> {
    let id = queue::enqueue(&pool.conn, &EntryPayload::ClockIn(payload))?;
    ttlog(&pool.conn, "enqueue", "clock_in", &format!("entry {}", id))?;
    Ok(id)
}

/// When no explicit clock-in reference is supplied, cross-link to the
/// owner's most recent still-pending clock-in at capture time. Timestamp
/// guessing never happens at sync time.
pub fn enqueue_clock_out(pool: &mut DbPool, mut payload: ClockOutPayload) -> AppResult<i64> {
    if payload.server_record_id.is_none() && payload.local_clock_in_id.is_none() {
        payload.local_clock_in_id =
            queue::latest_pending_clock_in(&pool.conn, &payload.owner_id)?;
    }

    let id = queue::enqueue(&pool.conn, &EntryPayload::ClockOut(payload))?;
    ttlog(&pool.conn, "enqueue", "clock_out", &format!("entry {}", id))?;
    Ok(id)
}

/// User-facing "N entries waiting" indicator.
pub fn pending_count(pool: &mut DbPool) -> AppResult<i64> {
    queue::count_pending(&pool.conn)
}

/// A legacy record imported from paper or an older system: one aggregate
/// break duration instead of discrete intervals.
pub struct LegacyImport {
    pub owner_id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub finish: NaiveTime,
    pub total_break_minutes: i64,
    pub context: WorkContext,
    pub allowances: Vec<String>,
}

/// Convert a legacy record into a queued work period, deriving discrete
/// breaks from the aggregate duration.
pub fn import_legacy_period(pool: &mut DbPool, import: LegacyImport) -> AppResult<i64> {
    let breaks = allocate_breaks(import.total_break_minutes, import.start, import.finish);

    let payload = WorkPeriodPayload {
        owner_id: import.owner_id,
        date: import.date,
        start: import.start,
        finish: import.finish,
        context: import.context,
        status: "imported".to_string(),
        allowances: import.allowances,
        gps: None,
        breaks,
        used_equipment: Vec::new(),
        mobilised_equipment: Vec::new(),
    };

    let id = enqueue_work_period(pool, payload)?;
    ttlog(&pool.conn, "import", "work_period", &format!("entry {}", id))?;
    Ok(id)
}
