//! Remote reconciliation API boundary.
//!
//! The orchestrator talks to the backend only through [`RemoteStore`], so
//! tests can substitute an in-memory double and the drain logic never sees
//! a wire format.

pub mod http;

pub use http::HttpRemote;

use crate::errors::RemoteError;
use crate::models::attendance::AttendanceRecord;
use serde_json::Value;

pub const WORK_PERIODS: &str = "work_periods";
pub const ATTENDANCE: &str = "attendance";
pub const WORK_PERIOD_BREAKS: &str = "work_period_breaks";
pub const WORK_PERIOD_EQUIPMENT: &str = "work_period_equipment";
pub const WORK_PERIOD_MOBILISATIONS: &str = "work_period_mobilisations";
pub const WORK_PERIOD_REVISIONS: &str = "work_period_revisions";

/// Abstract operations on the remote store. Every call may fail with a
/// transient or validation error; the caller decides what that means for
/// the entry being replayed.
pub trait RemoteStore {
    /// Create a record; returns the server-assigned id.
    fn create(&self, collection: &str, fields: &Value) -> Result<String, RemoteError>;

    /// Partially update an existing record.
    fn update(&self, collection: &str, id: &str, fields: &Value) -> Result<(), RemoteError>;

    /// Fetch one record by server id.
    fn fetch(&self, collection: &str, id: &str) -> Result<Value, RemoteError>;

    /// Delete every child row whose `parent_field` equals `parent_id`.
    /// Used by the replace-all child reconstruction on edit.
    fn delete_children(
        &self,
        collection: &str,
        parent_field: &str,
        parent_id: &str,
    ) -> Result<(), RemoteError>;

    /// Most recent open (no finish time) attendance record for an owner.
    fn query_open_attendance(
        &self,
        owner_id: &str,
    ) -> Result<Option<AttendanceRecord>, RemoteError>;
}
