//! Sync orchestrator: drains the local queue against the remote store.
//!
//! One drain per invocation, entries strictly in queue order so a clock-out
//! can observe the server id produced by its clock-in earlier in the same
//! drain. Per-entry failures never abort the drain; the caller always gets
//! a summary back.

use crate::db::catalog::EquipmentCatalog;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queue;
use crate::errors::{AppResult, RemoteError};
use crate::models::payload::{
    BreakInterval, ClockInPayload, ClockOutPayload, EntryPayload, WorkPeriodPayload,
};
use crate::remote::{
    RemoteStore, ATTENDANCE, WORK_PERIODS, WORK_PERIOD_BREAKS, WORK_PERIOD_EQUIPMENT,
    WORK_PERIOD_MOBILISATIONS,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serializes concurrent drains: a connectivity event and a manual "sync
/// now" firing together must not both resolve the same open attendance
/// record. The second invocation waits for the first to complete.
static DRAIN_LOCK: Mutex<()> = Mutex::new(());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Transient,
    Validation,
    Unresolved,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Transient => "transient",
            IssueKind::Validation => "validation",
            IssueKind::Unresolved => "unresolved",
        }
    }

    fn from_remote(err: &RemoteError) -> Self {
        if err.is_transient() {
            IssueKind::Transient
        } else {
            IssueKind::Validation
        }
    }
}

/// One reportable problem from a drain, tied to the queue entry it hit.
#[derive(Debug)]
pub struct SyncIssue {
    pub entry_id: i64,
    pub kind: IssueKind,
    pub message: String,
}

/// Reconciliation report for one drain. This is the contract: a report,
/// not a transaction.
#[derive(Debug, Default)]
pub struct SyncSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub unresolved: usize,
    pub issues: Vec<SyncIssue>,
}

impl SyncSummary {
    fn issue(&mut self, entry_id: i64, kind: IssueKind, message: impl Into<String>) {
        self.issues.push(SyncIssue {
            entry_id,
            kind,
            message: message.into(),
        });
    }
}

pub struct SyncEngine;

impl SyncEngine {
    /// Drain the queue once. Entries left pending stay pending; they are
    /// retried on every future invocation.
    pub fn run(
        pool: &mut DbPool,
        remote: &dyn RemoteStore,
        catalog: &EquipmentCatalog,
    ) -> AppResult<SyncSummary> {
        let _guard = DRAIN_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        Self::drain(pool, remote, catalog)
    }

    fn drain(
        pool: &mut DbPool,
        remote: &dyn RemoteStore,
        catalog: &EquipmentCatalog,
    ) -> AppResult<SyncSummary> {
        let entries = queue::list_pending(&pool.conn)?;
        let mut summary = SyncSummary::default();

        if entries.is_empty() {
            return Ok(summary);
        }

        // server ids produced by clock-ins synced earlier in this drain,
        // keyed by their queue id
        let mut synced_clock_ins: HashMap<i64, String> = HashMap::new();

        for entry in entries {
            match entry.payload.clone() {
                EntryPayload::WorkPeriod(p) => {
                    Self::sync_work_period(pool, remote, catalog, entry.id, &p, &mut summary)?;
                }
                EntryPayload::ClockIn(p) => {
                    Self::sync_clock_in(
                        pool,
                        remote,
                        entry.id,
                        &p,
                        &mut synced_clock_ins,
                        &mut summary,
                    )?;
                }
                EntryPayload::ClockOut(p) => {
                    Self::sync_clock_out(
                        pool,
                        remote,
                        entry.id,
                        &p,
                        &synced_clock_ins,
                        &mut summary,
                    )?;
                }
            }
        }

        ttlog(
            &pool.conn,
            "sync",
            "queue",
            &format!(
                "drain complete: {} succeeded, {} failed, {} unresolved",
                summary.succeeded, summary.failed, summary.unresolved
            ),
        )?;
        for issue in &summary.issues {
            ttlog(
                &pool.conn,
                "sync_issue",
                &issue.entry_id.to_string(),
                &format!("{}: {}", issue.kind.as_str(), issue.message),
            )?;
        }

        Ok(summary)
    }

    /// Parent first, then children against the server-assigned id. The
    /// entry is flagged synced as soon as the parent lands, so a child
    /// failure can never cause the parent to be re-created on a later
    /// drain.
    fn sync_work_period(
        pool: &mut DbPool,
        remote: &dyn RemoteStore,
        catalog: &EquipmentCatalog,
        entry_id: i64,
        payload: &WorkPeriodPayload,
        summary: &mut SyncSummary,
    ) -> AppResult<()> {
        let parent = work_period_fields(payload, entry_id);

        let server_id = match remote.create(WORK_PERIODS, &parent) {
            Ok(id) => id,
            Err(e) => {
                queue::increment_attempts(&pool.conn, entry_id)?;
                summary.failed += 1;
                summary.issue(entry_id, IssueKind::from_remote(&e), e.to_string());
                return Ok(());
            }
        };

        queue::mark_synced(&pool.conn, entry_id)?;
        summary.succeeded += 1;

        for b in &payload.breaks {
            if let Err(e) = remote.create(WORK_PERIOD_BREAKS, &break_fields(&server_id, b)) {
                summary.issue(
                    entry_id,
                    IssueKind::from_remote(&e),
                    format!("break {}-{}: {}", b.start, b.finish, e),
                );
            }
        }

        Self::sync_equipment_refs(
            remote,
            catalog,
            entry_id,
            &server_id,
            WORK_PERIOD_EQUIPMENT,
            &payload.used_equipment,
            summary,
        );
        Self::sync_equipment_refs(
            remote,
            catalog,
            entry_id,
            &server_id,
            WORK_PERIOD_MOBILISATIONS,
            &payload.mobilised_equipment,
            summary,
        );

        // all child operations attempted; prune the entry
        queue::delete_entry(&pool.conn, entry_id)?;
        Ok(())
    }

    /// Equipment numbers must resolve through the local catalog. Unresolved
    /// numbers become validation issues, never silent drops.
    fn sync_equipment_refs(
        remote: &dyn RemoteStore,
        catalog: &EquipmentCatalog,
        entry_id: i64,
        server_id: &str,
        collection: &str,
        numbers: &[String],
        summary: &mut SyncSummary,
    ) {
        for number in numbers {
            let Some(equipment_id) = catalog.resolve(number) else {
                summary.issue(
                    entry_id,
                    IssueKind::Validation,
                    format!("equipment number {} not in local catalog", number),
                );
                continue;
            };

            let fields = json!({
                "work_period_id": server_id,
                "equipment_id": equipment_id,
                "equipment_number": number,
            });
            if let Err(e) = remote.create(collection, &fields) {
                summary.issue(
                    entry_id,
                    IssueKind::from_remote(&e),
                    format!("equipment {}: {}", number, e),
                );
            }
        }
    }

    fn sync_clock_in(
        pool: &mut DbPool,
        remote: &dyn RemoteStore,
        entry_id: i64,
        payload: &ClockInPayload,
        synced_clock_ins: &mut HashMap<i64, String>,
        summary: &mut SyncSummary,
    ) -> AppResult<()> {
        match remote.create(ATTENDANCE, &clock_in_fields(payload, entry_id)) {
            Ok(server_id) => {
                // later clock-outs in this drain find the id here
                synced_clock_ins.insert(entry_id, server_id);
                queue::delete_entry(&pool.conn, entry_id)?;
                summary.succeeded += 1;
            }
            Err(e) => {
                queue::increment_attempts(&pool.conn, entry_id)?;
                summary.failed += 1;
                summary.issue(entry_id, IssueKind::from_remote(&e), e.to_string());
            }
        }
        Ok(())
    }

    /// Resolution priority: (i) server id recorded at capture time,
    /// (ii) clock-in synced earlier in this drain, (iii) the remote open
    /// attendance record for the owner. Never fabricate an id.
    fn sync_clock_out(
        pool: &mut DbPool,
        remote: &dyn RemoteStore,
        entry_id: i64,
        payload: &ClockOutPayload,
        synced_clock_ins: &HashMap<i64, String>,
        summary: &mut SyncSummary,
    ) -> AppResult<()> {
        let mut target = payload.server_record_id.clone().or_else(|| {
            payload
                .local_clock_in_id
                .and_then(|local| synced_clock_ins.get(&local).cloned())
        });

        if target.is_none() {
            match remote.query_open_attendance(&payload.owner_id) {
                Ok(found) => target = found.map(|r| r.id),
                Err(e) => {
                    queue::increment_attempts(&pool.conn, entry_id)?;
                    summary.failed += 1;
                    summary.issue(entry_id, IssueKind::from_remote(&e), e.to_string());
                    return Ok(());
                }
            }
        }

        let Some(record_id) = target else {
            summary.unresolved += 1;
            summary.issue(
                entry_id,
                IssueKind::Unresolved,
                format!(
                    "no matching clock-in found for owner {}; left pending",
                    payload.owner_id
                ),
            );
            return Ok(());
        };

        match remote.update(ATTENDANCE, &record_id, &clock_out_fields(payload)) {
            Ok(()) => {
                queue::delete_entry(&pool.conn, entry_id)?;
                summary.succeeded += 1;
            }
            Err(e) => {
                queue::increment_attempts(&pool.conn, entry_id)?;
                summary.failed += 1;
                summary.issue(entry_id, IssueKind::from_remote(&e), e.to_string());
            }
        }
        Ok(())
    }
}

/// Parent fields only: the child sub-lists are stripped and recreated as
/// separate rows once the server id is known. `offline_id` records which
/// queue entry produced the record, for audit.
pub fn work_period_fields(payload: &WorkPeriodPayload, offline_id: i64) -> Value {
    json!({
        "owner_id": payload.owner_id,
        "date": payload.date,
        "start_time": payload.start,
        "finish_time": payload.finish,
        "context": payload.context,
        "status": payload.status,
        "allowances": payload.allowances,
        "gps": payload.gps,
        "offline_id": offline_id,
    })
}

pub fn break_fields(server_id: &str, b: &BreakInterval) -> Value {
    json!({
        "work_period_id": server_id,
        "start_time": b.start,
        "finish_time": b.finish,
        "reason": b.reason,
        "position": b.position,
    })
}

fn clock_in_fields(payload: &ClockInPayload, offline_id: i64) -> Value {
    json!({
        "owner_id": payload.owner_id,
        "date": payload.date,
        "start": payload.start,
        "finish": Value::Null,
        "gps": payload.gps,
        "offline_id": offline_id,
    })
}

fn clock_out_fields(payload: &ClockOutPayload) -> Value {
    json!({
        "finish": payload.finish,
        "gps": payload.gps,
    })
}
