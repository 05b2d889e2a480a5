use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check whether a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check whether a table has a given column.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `pending_entries` table with the modern schema.
///
/// The AUTOINCREMENT id is the replay sequence: list_pending orders by it,
/// never by the created_at string, so clock skew across restarts cannot
/// reorder entries.
fn create_pending_entries_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS pending_entries (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            entry_type        TEXT NOT NULL CHECK(entry_type IN ('work_period','clock_in','clock_out')),
            target_collection TEXT NOT NULL,
            payload           TEXT NOT NULL,
            created_at        TEXT NOT NULL,
            synced            INTEGER NOT NULL DEFAULT 0,
            sync_attempts     INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_pending_synced ON pending_entries(synced);
        CREATE INDEX IF NOT EXISTS idx_pending_type ON pending_entries(entry_type, synced);
        "#,
    )?;
    Ok(())
}

/// Create the locally cached equipment catalog.
fn create_equipment_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS equipment (
            number      TEXT PRIMARY KEY,
            server_id   TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

/// Add the `sync_attempts` column to queues created by pre-0.2 schemas.
fn migrate_add_sync_attempts_column(conn: &Connection) -> Result<()> {
    let version = "20250704_0003_add_sync_attempts";

    // 1) Skip if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if has_column(conn, "pending_entries", "sync_attempts")? {
        // Fresh schema already carries the column; just record the marker.
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, 'sync_attempts already present')",
            [version],
        )?;
        return Ok(());
    }

    // 2) Apply
    conn.execute(
        "ALTER TABLE pending_entries ADD COLUMN sync_attempts INTEGER NOT NULL DEFAULT 0;",
        [],
    )?;

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added sync_attempts to pending_entries')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'sync_attempts' to pending_entries",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table (migration markers live there)
    ensure_log_table(conn)?;

    // 2) Ensure queue table exists
    if !table_exists(conn, "pending_entries")? {
        create_pending_entries_table(conn)?;
    } else {
        conn.execute_batch(
            r#"
            CREATE INDEX IF NOT EXISTS idx_pending_synced ON pending_entries(synced);
            CREATE INDEX IF NOT EXISTS idx_pending_type ON pending_entries(entry_type, synced);
            "#,
        )?;
    }

    // 3) Equipment catalog cache
    create_equipment_table(conn)?;

    // 4) Column-level migrations
    migrate_add_sync_attempts_column(conn)?;

    Ok(())
}
