use super::entry_type::EntryType;
use super::payload::EntryPayload;
use serde::Serialize;

/// A locally queued, not-yet-confirmed event.
///
/// `id` is the AUTOINCREMENT row id and doubles as the monotonic replay
/// sequence: it is assigned at enqueue time and is independent of device
/// clock correctness. `created_at` is kept for display and audit only.
#[derive(Debug, Clone, Serialize)]
pub struct PendingEntry {
    pub id: i64,
    pub entry_type: EntryType,
    pub target_collection: String,
    pub payload: EntryPayload,
    pub created_at: String, // ISO 8601
    pub synced: bool,
    pub sync_attempts: i32,
}
