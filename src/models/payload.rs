//! Typed payloads for queued entries.
//!
//! One strongly-typed struct per entry kind, joined in a tagged union.
//! The queue serializes the union to JSON in a single column; replaying
//! never has to guess which fields a row carries.

use super::entry_type::EntryType;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A discrete break inside a work period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreakInterval {
    pub start: NaiveTime,
    pub finish: NaiveTime,
    pub reason: String,
    /// Display order within the parent work period.
    pub position: i32,
}

impl BreakInterval {
    pub fn duration_minutes(&self) -> i64 {
        (self.finish - self.start).num_minutes()
    }
}

/// What the worker was doing: a project site or a piece of equipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkContext {
    Project { code: String },
    Equipment { number: String },
}

impl WorkContext {
    pub fn describe(&self) -> String {
        match self {
            WorkContext::Project { code } => format!("project {}", code),
            WorkContext::Equipment { number } => format!("equipment {}", number),
        }
    }
}

/// GPS fix captured on the device, if location was available.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsFix {
    pub lat: f64,
    pub lon: f64,
}

/// Full snapshot of an offline-recorded work period, including the child
/// sub-lists that become separate remote rows once the parent id is known.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkPeriodPayload {
    pub owner_id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub finish: NaiveTime,
    pub context: WorkContext,
    pub status: String,
    #[serde(default)]
    pub allowances: Vec<String>,
    #[serde(default)]
    pub gps: Option<GpsFix>,
    #[serde(default)]
    pub breaks: Vec<BreakInterval>,
    #[serde(default)]
    pub used_equipment: Vec<String>,
    #[serde(default)]
    pub mobilised_equipment: Vec<String>,
}

/// Offline clock-in: opens a new attendance record on the remote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClockInPayload {
    pub owner_id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    #[serde(default)]
    pub gps: Option<GpsFix>,
}

/// Offline clock-out: closes an attendance record.
///
/// `server_record_id` is set when the matching clock-in was recorded online.
/// `local_clock_in_id` points at the queue id of a still-pending clock-in,
/// so the orchestrator can link the two within one drain without guessing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClockOutPayload {
    pub owner_id: String,
    pub date: NaiveDate,
    pub finish: NaiveTime,
    #[serde(default)]
    pub gps: Option<GpsFix>,
    #[serde(default)]
    pub server_record_id: Option<String>,
    #[serde(default)]
    pub local_clock_in_id: Option<i64>,
}

/// Tagged union stored in the queue's payload column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "entry_type", rename_all = "snake_case")]
pub enum EntryPayload {
    WorkPeriod(WorkPeriodPayload),
    ClockIn(ClockInPayload),
    ClockOut(ClockOutPayload),
}

impl EntryPayload {
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryPayload::WorkPeriod(_) => EntryType::WorkPeriod,
            EntryPayload::ClockIn(_) => EntryType::ClockIn,
            EntryPayload::ClockOut(_) => EntryType::ClockOut,
        }
    }

    pub fn owner_id(&self) -> &str {
        match self {
            EntryPayload::WorkPeriod(p) => &p.owner_id,
            EntryPayload::ClockIn(p) => &p.owner_id,
            EntryPayload::ClockOut(p) => &p.owner_id,
        }
    }
}
