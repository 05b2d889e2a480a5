//! Online edit of an already-synced work period.
//!
//! Shares the child-record discipline of the sync path: children are always
//! replaced as a full set, never patched incrementally. Each changed parent
//! field leaves one revision record behind.

use crate::db::catalog::EquipmentCatalog;
use crate::errors::{AppResult, RemoteError};
use crate::models::payload::{BreakInterval, WorkContext};
use crate::remote::{
    RemoteStore, WORK_PERIODS, WORK_PERIOD_BREAKS, WORK_PERIOD_EQUIPMENT,
    WORK_PERIOD_MOBILISATIONS, WORK_PERIOD_REVISIONS,
};
use chrono::{NaiveTime, Utc};
use serde_json::{json, Map, Value};

/// Requested changes. `None` leaves a parent field untouched; the child
/// sets always replace whatever the server holds.
#[derive(Debug, Default, Clone)]
pub struct WorkPeriodChanges {
    pub start: Option<NaiveTime>,
    pub finish: Option<NaiveTime>,
    pub status: Option<String>,
    pub context: Option<WorkContext>,
    pub allowances: Option<Vec<String>>,
    pub breaks: Vec<BreakInterval>,
    pub used_equipment: Vec<String>,
    pub mobilised_equipment: Vec<String>,
}

/// What the edit actually did.
#[derive(Debug, Default)]
pub struct EditReport {
    /// Parent fields that differed and were revised.
    pub revised_fields: Vec<String>,
    /// Equipment numbers that could not be resolved locally. Reported,
    /// never silently dropped.
    pub unresolved_equipment: Vec<String>,
}

/// Apply an edit: revise changed parent fields, then discard and re-insert
/// the full child sets against the parent's server id.
pub fn update_work_period(
    remote: &dyn RemoteStore,
    catalog: &EquipmentCatalog,
    server_id: &str,
    changes: &WorkPeriodChanges,
) -> AppResult<EditReport> {
    let current = remote.fetch(WORK_PERIODS, server_id)?;
    let mut report = EditReport::default();

    let mut updates = Map::new();
    stage_change(&current, &mut updates, "start_time", changes.start.map(|t| json!(t)));
    stage_change(&current, &mut updates, "finish_time", changes.finish.map(|t| json!(t)));
    stage_change(
        &current,
        &mut updates,
        "status",
        changes.status.as_ref().map(|s| json!(s)),
    );
    stage_change(
        &current,
        &mut updates,
        "context",
        changes.context.as_ref().map(|c| json!(c)),
    );
    stage_change(
        &current,
        &mut updates,
        "allowances",
        changes.allowances.as_ref().map(|a| json!(a)),
    );

    // one revision row per changed field, then the parent update itself
    let changed_at = Utc::now().to_rfc3339();
    for (field, new_value) in &updates {
        let old_value = current.get(field).cloned().unwrap_or(Value::Null);
        remote.create(
            WORK_PERIOD_REVISIONS,
            &json!({
                "work_period_id": server_id,
                "field": field,
                "old_value": old_value,
                "new_value": new_value,
                "changed_at": changed_at,
            }),
        )?;
        report.revised_fields.push(field.clone());
    }

    if !updates.is_empty() {
        remote.update(WORK_PERIODS, server_id, &Value::Object(updates))?;
    }

    replace_children(remote, catalog, server_id, changes, &mut report)?;

    Ok(report)
}

fn stage_change(
    current: &Value,
    updates: &mut Map<String, Value>,
    field: &str,
    requested: Option<Value>,
) {
    if let Some(new_value) = requested {
        let old_value = current.get(field).cloned().unwrap_or(Value::Null);
        if old_value != new_value {
            updates.insert(field.to_string(), new_value);
        }
    }
}

/// Delete all existing child rows, re-insert the full replacement sets.
fn replace_children(
    remote: &dyn RemoteStore,
    catalog: &EquipmentCatalog,
    server_id: &str,
    changes: &WorkPeriodChanges,
    report: &mut EditReport,
) -> Result<(), RemoteError> {
    for collection in [
        WORK_PERIOD_BREAKS,
        WORK_PERIOD_EQUIPMENT,
        WORK_PERIOD_MOBILISATIONS,
    ] {
        remote.delete_children(collection, "work_period_id", server_id)?;
    }

    for b in &changes.breaks {
        remote.create(
            WORK_PERIOD_BREAKS,
            &crate::core::sync::break_fields(server_id, b),
        )?;
    }

    insert_equipment(
        remote,
        catalog,
        server_id,
        WORK_PERIOD_EQUIPMENT,
        &changes.used_equipment,
        report,
    )?;
    insert_equipment(
        remote,
        catalog,
        server_id,
        WORK_PERIOD_MOBILISATIONS,
        &changes.mobilised_equipment,
        report,
    )?;

    Ok(())
}

fn insert_equipment(
    remote: &dyn RemoteStore,
    catalog: &EquipmentCatalog,
    server_id: &str,
    collection: &str,
    numbers: &[String],
    report: &mut EditReport,
) -> Result<(), RemoteError> {
    for number in numbers {
        let Some(equipment_id) = catalog.resolve(number) else {
            report.unresolved_equipment.push(number.clone());
            continue;
        };
        remote.create(
            collection,
            &json!({
                "work_period_id": server_id,
                "equipment_id": equipment_id,
                "equipment_number": number,
            }),
        )?;
    }
    Ok(())
}
