#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};
use chrono::{NaiveDate, NaiveTime};
use fieldsync::db::catalog::EquipmentCatalog;
use fieldsync::db::initialize::init_db;
use fieldsync::db::pool::DbPool;
use fieldsync::errors::RemoteError;
use fieldsync::models::attendance::AttendanceRecord;
use fieldsync::models::payload::{
    ClockInPayload, ClockOutPayload, WorkContext, WorkPeriodPayload,
};
use fieldsync::remote::{RemoteStore, ATTENDANCE};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

pub fn fsx() -> Command {
    cargo_bin_cmd!("fieldsync")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fieldsync.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Open (and initialize) a pool on a test database.
pub fn open_pool(db_path: &str) -> DbPool {
    let pool = DbPool::new(db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("time")
}

pub fn work_period_payload(owner: &str, start: &str, finish: &str) -> WorkPeriodPayload {
    WorkPeriodPayload {
        owner_id: owner.to_string(),
        date: date("2025-06-02"),
        start: time(start),
        finish: time(finish),
        context: WorkContext::Project {
            code: "P-100".to_string(),
        },
        status: "submitted".to_string(),
        allowances: vec![],
        gps: None,
        breaks: vec![],
        used_equipment: vec![],
        mobilised_equipment: vec![],
    }
}

pub fn clock_in_payload(owner: &str, start: &str) -> ClockInPayload {
    ClockInPayload {
        owner_id: owner.to_string(),
        date: date("2025-06-02"),
        start: time(start),
        gps: None,
    }
}

pub fn clock_out_payload(owner: &str, finish: &str) -> ClockOutPayload {
    ClockOutPayload {
        owner_id: owner.to_string(),
        date: date("2025-06-02"),
        finish: time(finish),
        gps: None,
        server_record_id: None,
        local_clock_in_id: None,
    }
}

pub fn empty_catalog() -> EquipmentCatalog {
    EquipmentCatalog::default()
}

pub fn catalog_with(entries: &[(&str, &str)]) -> EquipmentCatalog {
    EquipmentCatalog::from_entries(
        entries
            .iter()
            .map(|(n, id)| (n.to_string(), id.to_string()))
            .collect(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailKind {
    Transient,
    Validation,
}

impl FailKind {
    fn to_error(self, collection: &str) -> RemoteError {
        match self {
            FailKind::Transient => {
                RemoteError::Transient(format!("injected transient failure on {}", collection))
            }
            FailKind::Validation => {
                RemoteError::Validation(format!("injected validation failure on {}", collection))
            }
        }
    }
}

#[derive(Default)]
struct MockState {
    next_id: u64,
    records: HashMap<String, Vec<(String, Value)>>,
    fail_create: HashMap<String, (FailKind, Option<usize>)>,
    create_log: Vec<String>,
}

/// In-memory remote store double: records every create, supports injected
/// failures per collection (always, or for the next N calls).
#[derive(Default)]
pub struct MockRemote {
    inner: RefCell<MockState>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every create on `collection` until cleared.
    pub fn fail_create(&self, collection: &str, kind: FailKind) {
        self.inner
            .borrow_mut()
            .fail_create
            .insert(collection.to_string(), (kind, None));
    }

    /// Fail the next `times` creates on `collection`, then succeed.
    pub fn fail_create_times(&self, collection: &str, kind: FailKind, times: usize) {
        self.inner
            .borrow_mut()
            .fail_create
            .insert(collection.to_string(), (kind, Some(times)));
    }

    pub fn clear_failures(&self) {
        self.inner.borrow_mut().fail_create.clear();
    }

    /// All records created in a collection, in creation order.
    pub fn records(&self, collection: &str) -> Vec<(String, Value)> {
        self.inner
            .borrow()
            .records
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of successful creates in a collection.
    pub fn create_count(&self, collection: &str) -> usize {
        self.inner
            .borrow()
            .create_log
            .iter()
            .filter(|c| c.as_str() == collection)
            .count()
    }

    pub fn total_creates(&self) -> usize {
        self.inner.borrow().create_log.len()
    }

    /// Seed an already-open attendance record, as if the clock-in had been
    /// recorded online.
    pub fn seed_open_attendance(&self, owner: &str, day: &str, start: &str) -> String {
        self.create(
            ATTENDANCE,
            &json!({
                "owner_id": owner,
                "date": day,
                "start": format!("{}:00", start),
                "finish": Value::Null,
            }),
        )
        .expect("seed attendance")
    }
}

impl RemoteStore for MockRemote {
    fn create(&self, collection: &str, fields: &Value) -> Result<String, RemoteError> {
        let mut st = self.inner.borrow_mut();

        if let Some((kind, remaining)) = st.fail_create.get_mut(collection) {
            let fire = match remaining {
                None => true,
                Some(0) => false,
                Some(n) => {
                    *n -= 1;
                    true
                }
            };
            if fire {
                return Err(kind.to_error(collection));
            }
        }

        st.next_id += 1;
        let id = format!("srv-{}", st.next_id);

        let mut stored = fields.clone();
        if let Some(obj) = stored.as_object_mut() {
            obj.insert("id".to_string(), json!(id));
        }

        st.create_log.push(collection.to_string());
        st.records
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), stored));

        Ok(id)
    }

    fn update(&self, collection: &str, id: &str, fields: &Value) -> Result<(), RemoteError> {
        let mut st = self.inner.borrow_mut();
        let rows = st
            .records
            .get_mut(collection)
            .ok_or_else(|| RemoteError::Validation(format!("no collection {}", collection)))?;

        let row = rows
            .iter_mut()
            .find(|(rid, _)| rid == id)
            .ok_or_else(|| RemoteError::Validation(format!("no record {} in {}", id, collection)))?;

        if let (Some(target), Some(patch)) = (row.1.as_object_mut(), fields.as_object()) {
            for (k, v) in patch {
                target.insert(k.clone(), v.clone());
            }
        }
        Ok(())
    }

    fn fetch(&self, collection: &str, id: &str) -> Result<Value, RemoteError> {
        self.inner
            .borrow()
            .records
            .get(collection)
            .and_then(|rows| rows.iter().find(|(rid, _)| rid == id))
            .map(|(_, v)| v.clone())
            .ok_or_else(|| RemoteError::Validation(format!("no record {} in {}", id, collection)))
    }

    fn delete_children(
        &self,
        collection: &str,
        parent_field: &str,
        parent_id: &str,
    ) -> Result<(), RemoteError> {
        let mut st = self.inner.borrow_mut();
        if let Some(rows) = st.records.get_mut(collection) {
            rows.retain(|(_, v)| v.get(parent_field).and_then(Value::as_str) != Some(parent_id));
        }
        Ok(())
    }

    fn query_open_attendance(
        &self,
        owner_id: &str,
    ) -> Result<Option<AttendanceRecord>, RemoteError> {
        let st = self.inner.borrow();
        let Some(rows) = st.records.get(ATTENDANCE) else {
            return Ok(None);
        };

        // most recent open record wins
        for (_, v) in rows.iter().rev() {
            let Ok(rec) = serde_json::from_value::<AttendanceRecord>(v.clone()) else {
                continue;
            };
            if rec.owner_id == owner_id && rec.is_open() {
                return Ok(Some(rec));
            }
        }
        Ok(None)
    }
}

/// Thread-safe remote double for exercising overlapping drains: every
/// update stalls for `delay` so two invocations racing on the same queue
/// would demonstrably overlap without serialization.
pub struct SlowRemote {
    updates: StdMutex<Vec<(String, String)>>,
    delay: Duration,
}

impl SlowRemote {
    pub fn new(delay: Duration) -> Self {
        Self {
            updates: StdMutex::new(Vec::new()),
            delay,
        }
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

impl RemoteStore for SlowRemote {
    fn create(&self, _collection: &str, _fields: &Value) -> Result<String, RemoteError> {
        Ok("srv-1".to_string())
    }

    fn update(&self, collection: &str, id: &str, _fields: &Value) -> Result<(), RemoteError> {
        std::thread::sleep(self.delay);
        self.updates
            .lock()
            .unwrap()
            .push((collection.to_string(), id.to_string()));
        Ok(())
    }

    fn fetch(&self, _collection: &str, _id: &str) -> Result<Value, RemoteError> {
        Ok(Value::Null)
    }

    fn delete_children(
        &self,
        _collection: &str,
        _parent_field: &str,
        _parent_id: &str,
    ) -> Result<(), RemoteError> {
        Ok(())
    }

    fn query_open_attendance(
        &self,
        _owner_id: &str,
    ) -> Result<Option<AttendanceRecord>, RemoteError> {
        Ok(None)
    }
}
