use serde::{Deserialize, Serialize};

/// Kind of a locally queued event. Closed enumeration: the queue never
/// carries anything it does not know how to replay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    WorkPeriod,
    ClockIn,
    ClockOut,
}

impl EntryType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryType::WorkPeriod => "work_period",
            EntryType::ClockIn => "clock_in",
            EntryType::ClockOut => "clock_out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "work_period" => Some(EntryType::WorkPeriod),
            "clock_in" => Some(EntryType::ClockIn),
            "clock_out" => Some(EntryType::ClockOut),
            _ => None,
        }
    }

    /// Remote collection this entry ultimately targets.
    pub fn target_collection(&self) -> &'static str {
        match self {
            EntryType::WorkPeriod => crate::remote::WORK_PERIODS,
            EntryType::ClockIn | EntryType::ClockOut => crate::remote::ATTENDANCE,
        }
    }
}
