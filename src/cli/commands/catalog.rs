use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::catalog::{list_equipment, upsert_equipment};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Catalog {
        add,
        number,
        id,
        desc,
        list,
    } = cmd
    {
        let pool = open_pool(cfg)?;

        if *add {
            let number = number
                .as_ref()
                .ok_or_else(|| AppError::Other("missing --number".into()))?;
            let id = id
                .as_ref()
                .ok_or_else(|| AppError::Other("missing --id".into()))?;

            upsert_equipment(&pool.conn, number, id, desc.as_deref().unwrap_or(""))?;
            success(format!("Equipment {} cached.", number));
        }

        if *list {
            for (number, server_id, description) in list_equipment(&pool.conn)? {
                println!("{:<12} {:<24} {}", number, server_id, description);
            }
        }
    }
    Ok(())
}
