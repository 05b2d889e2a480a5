//! Locally cached equipment catalog.
//!
//! Children of a work period may only reference equipment the device can
//! resolve to a server id at sync time. The cache is read-only during a
//! drain.

use crate::errors::AppResult;
use rusqlite::{params, Connection};
use std::collections::HashMap;

/// In-memory lookup from equipment number to server id.
#[derive(Debug, Default)]
pub struct EquipmentCatalog {
    by_number: HashMap<String, String>,
}

impl EquipmentCatalog {
    pub fn resolve(&self, number: &str) -> Option<&str> {
        self.by_number.get(number).map(String::as_str)
    }

    #[doc(hidden)]
    pub fn from_entries(entries: Vec<(String, String)>) -> Self {
        Self {
            by_number: entries.into_iter().collect(),
        }
    }
}

/// Load the whole cached catalog for a drain.
pub fn load_catalog(conn: &Connection) -> AppResult<EquipmentCatalog> {
    let mut stmt = conn.prepare_cached("SELECT number, server_id FROM equipment")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut by_number = HashMap::new();
    for r in rows {
        let (number, server_id) = r?;
        by_number.insert(number, server_id);
    }
    Ok(EquipmentCatalog { by_number })
}

/// Insert or replace one cached equipment row.
pub fn upsert_equipment(
    conn: &Connection,
    number: &str,
    server_id: &str,
    description: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO equipment (number, server_id, description)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(number) DO UPDATE SET server_id = ?2, description = ?3",
        params![number, server_id, description],
    )?;
    Ok(())
}

/// List the cached catalog for display, ordered by number.
pub fn list_equipment(conn: &Connection) -> AppResult<Vec<(String, String, String)>> {
    let mut stmt = conn
        .prepare_cached("SELECT number, server_id, description FROM equipment ORDER BY number")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
