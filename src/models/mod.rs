pub mod attendance;
pub mod entry_type;
pub mod payload;
pub mod pending_entry;
