use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A clock-in/clock-out pair as the remote store sees it.
/// `finish` stays empty while the record is open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: String,
    pub owner_id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    #[serde(default)]
    pub finish: Option<NaiveTime>,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.finish.is_none()
    }
}
