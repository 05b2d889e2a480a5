use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let pool = open_pool(cfg)?;

        if *migrate {
            run_pending_migrations(&pool.conn)?;
            success("Migrations up to date.");
        }

        if *check {
            let ok: String =
                pool.conn
                    .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            info(format!("Integrity check: {}", ok));
        }

        if *vacuum {
            pool.conn.execute_batch("VACUUM;")?;
            success("Database vacuumed.");
        }

        if *show_info {
            let pending: i64 = pool.conn.query_row(
                "SELECT COUNT(*) FROM pending_entries WHERE synced = 0",
                [],
                |r| r.get(0),
            )?;
            let equipment: i64 =
                pool.conn
                    .query_row("SELECT COUNT(*) FROM equipment", [], |r| r.get(0))?;
            let log_rows: i64 =
                pool.conn
                    .query_row("SELECT COUNT(*) FROM log", [], |r| r.get(0))?;

            info(format!("Database:          {}", cfg.database));
            info(format!("Pending entries:   {}", pending));
            info(format!("Cached equipment:  {}", equipment));
            info(format!("Audit log rows:    {}", log_rows));
        }
    }
    Ok(())
}
