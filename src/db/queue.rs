//! Durable local queue of pending entries.
//!
//! Single-writer discipline: the sync orchestrator is the only mutator;
//! the pending-count indicator may read concurrently. The queue owns no
//! business logic.

use crate::errors::{AppError, AppResult};
use crate::models::entry_type::EntryType;
use crate::models::payload::EntryPayload;
use crate::models::pending_entry::PendingEntry;
use chrono::Utc;
use rusqlite::{params, Connection, Result, Row};

/// Append a new entry. Storage errors are fatal to the caller: the UI must
/// be able to flag "not saved" instead of silently dropping the event.
pub fn enqueue(conn: &Connection, payload: &EntryPayload) -> AppResult<i64> {
    let entry_type = payload.entry_type();
    let body = serde_json::to_string(payload)?;

    conn.execute(
        "INSERT INTO pending_entries (entry_type, target_collection, payload, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            entry_type.to_db_str(),
            entry_type.target_collection(),
            body,
            Utc::now().to_rfc3339(),
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

fn map_row(row: &Row) -> Result<PendingEntry> {
    let type_str: String = row.get("entry_type")?;
    let entry_type = EntryType::from_db_str(&type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidEntryType(type_str.clone())),
        )
    })?;

    let body: String = row.get("payload")?;
    let payload: EntryPayload = serde_json::from_str(&body).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Payload(e)),
        )
    })?;

    Ok(PendingEntry {
        id: row.get("id")?,
        entry_type,
        target_collection: row.get("target_collection")?,
        payload,
        created_at: row.get("created_at")?,
        synced: row.get::<_, i32>("synced")? == 1,
        sync_attempts: row.get("sync_attempts")?,
    })
}

/// Materialized snapshot of everything still waiting, in replay order
/// (monotonic queue id ascending, not wall-clock strings).
pub fn list_pending(conn: &Connection) -> AppResult<Vec<PendingEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, entry_type, target_collection, payload, created_at, synced, sync_attempts
         FROM pending_entries
         WHERE synced = 0
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Load one entry regardless of synced state.
pub fn get_entry(conn: &Connection, id: i64) -> AppResult<Option<PendingEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, entry_type, target_collection, payload, created_at, synced, sync_attempts
         FROM pending_entries
         WHERE id = ?1",
    )?;

    match stmt.query_row([id], map_row) {
        Ok(e) => Ok(Some(e)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Flag an entry as accepted by the remote store. Idempotent; unknown ids
/// are a no-op.
pub fn mark_synced(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE pending_entries SET synced = 1 WHERE id = ?1",
        [id],
    )?;
    Ok(())
}

/// Bump the failure counter. Idempotent on unknown ids.
pub fn increment_attempts(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE pending_entries SET sync_attempts = sync_attempts + 1 WHERE id = ?1",
        [id],
    )?;
    Ok(())
}

/// Remove a confirmed entry so the queue never accumulates synced rows.
/// Idempotent on unknown ids.
pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM pending_entries WHERE id = ?1", [id])?;
    Ok(())
}

/// Number of entries still waiting. Indexed on `synced`, cheap to poll.
pub fn count_pending(conn: &Connection) -> AppResult<i64> {
    let mut stmt =
        conn.prepare_cached("SELECT COUNT(*) FROM pending_entries WHERE synced = 0")?;
    let n: i64 = stmt.query_row([], |r| r.get(0))?;
    Ok(n)
}

/// Most recent still-pending clock-in for an owner, if any.
/// Used at capture time to cross-reference a clock-out to its clock-in.
pub fn latest_pending_clock_in(conn: &Connection, owner_id: &str) -> AppResult<Option<i64>> {
    let entries = list_pending(conn)?;
    let found = entries
        .iter()
        .rev()
        .find(|e| {
            e.entry_type == EntryType::ClockIn && e.payload.owner_id() == owner_id
        })
        .map(|e| e.id);
    Ok(found)
}
