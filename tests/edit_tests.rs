mod common;

use common::{catalog_with, empty_catalog, time, MockRemote};
use fieldsync::core::edit::{update_work_period, WorkPeriodChanges};
use fieldsync::models::payload::BreakInterval;
use fieldsync::remote::{
    RemoteStore, WORK_PERIODS, WORK_PERIOD_BREAKS, WORK_PERIOD_EQUIPMENT,
    WORK_PERIOD_REVISIONS,
};
use serde_json::json;

fn seed_work_period(remote: &MockRemote) -> String {
    remote
        .create(
            WORK_PERIODS,
            &json!({
                "owner_id": "w1",
                "date": "2025-06-02",
                "start_time": "08:00:00",
                "finish_time": "16:00:00",
                "status": "submitted",
                "allowances": [],
            }),
        )
        .unwrap()
}

#[test]
fn test_one_revision_per_changed_field() {
    let remote = MockRemote::new();
    let server_id = seed_work_period(&remote);

    let changes = WorkPeriodChanges {
        start: Some(time("07:30")),
        // same value as stored: must not produce a revision
        status: Some("submitted".to_string()),
        finish: Some(time("17:00")),
        ..Default::default()
    };

    let report = update_work_period(&remote, &empty_catalog(), &server_id, &changes).unwrap();

    let mut revised = report.revised_fields.clone();
    revised.sort();
    assert_eq!(revised, vec!["finish_time", "start_time"]);

    let revisions = remote.records(WORK_PERIOD_REVISIONS);
    assert_eq!(revisions.len(), 2);
    for (_, r) in &revisions {
        assert_eq!(r["work_period_id"], server_id.as_str());
        assert!(r.get("old_value").is_some());
        assert!(r.get("new_value").is_some());
    }

    let parent = remote.fetch(WORK_PERIODS, &server_id).unwrap();
    assert_eq!(parent["start_time"], "07:30:00");
    assert_eq!(parent["finish_time"], "17:00:00");
    assert_eq!(parent["status"], "submitted");
}

#[test]
fn test_no_changes_means_no_revisions_and_no_update() {
    let remote = MockRemote::new();
    let server_id = seed_work_period(&remote);

    let report = update_work_period(
        &remote,
        &empty_catalog(),
        &server_id,
        &WorkPeriodChanges::default(),
    )
    .unwrap();

    assert!(report.revised_fields.is_empty());
    assert!(remote.records(WORK_PERIOD_REVISIONS).is_empty());

    let parent = remote.fetch(WORK_PERIODS, &server_id).unwrap();
    assert_eq!(parent["start_time"], "08:00:00");
}

#[test]
fn test_children_are_replaced_as_a_full_set() {
    let remote = MockRemote::new();
    let server_id = seed_work_period(&remote);

    // pre-existing children on the server
    remote
        .create(
            WORK_PERIOD_BREAKS,
            &json!({ "work_period_id": server_id, "reason": "old" }),
        )
        .unwrap();
    remote
        .create(
            WORK_PERIOD_BREAKS,
            &json!({ "work_period_id": server_id, "reason": "older" }),
        )
        .unwrap();

    let changes = WorkPeriodChanges {
        breaks: vec![BreakInterval {
            start: time("12:00"),
            finish: time("12:45"),
            reason: "Lunch".to_string(),
            position: 0,
        }],
        ..Default::default()
    };

    update_work_period(&remote, &empty_catalog(), &server_id, &changes).unwrap();

    let breaks = remote.records(WORK_PERIOD_BREAKS);
    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].1["reason"], "Lunch");
}

#[test]
fn test_children_of_other_periods_are_untouched() {
    let remote = MockRemote::new();
    let server_id = seed_work_period(&remote);
    let other_id = seed_work_period(&remote);

    remote
        .create(
            WORK_PERIOD_BREAKS,
            &json!({ "work_period_id": other_id, "reason": "keep" }),
        )
        .unwrap();

    update_work_period(
        &remote,
        &empty_catalog(),
        &server_id,
        &WorkPeriodChanges::default(),
    )
    .unwrap();

    let breaks = remote.records(WORK_PERIOD_BREAKS);
    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].1["reason"], "keep");
}

#[test]
fn test_unresolved_equipment_is_reported_not_dropped_silently() {
    let remote = MockRemote::new();
    let server_id = seed_work_period(&remote);
    let catalog = catalog_with(&[("EX-12", "eq-srv-1")]);

    let changes = WorkPeriodChanges {
        used_equipment: vec!["EX-12".to_string(), "EX-99".to_string()],
        ..Default::default()
    };

    let report = update_work_period(&remote, &catalog, &server_id, &changes).unwrap();

    assert_eq!(report.unresolved_equipment, vec!["EX-99".to_string()]);

    let equipment = remote.records(WORK_PERIOD_EQUIPMENT);
    assert_eq!(equipment.len(), 1);
    assert_eq!(equipment[0].1["equipment_number"], "EX-12");
}
