use crate::cli::commands::open_pool;
use crate::config::Config;
use crate::db::queue;
use crate::errors::AppResult;
use crate::models::payload::EntryPayload;
use crate::ui::messages::info;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = open_pool(cfg)?;

    let count = queue::count_pending(&pool.conn)?;
    info(format!("{} pending entries", count));

    for entry in queue::list_pending(&pool.conn)? {
        let detail = match &entry.payload {
            EntryPayload::WorkPeriod(p) => p.context.describe(),
            EntryPayload::ClockIn(p) => format!("in {}", p.start.format("%H:%M")),
            EntryPayload::ClockOut(p) => format!("out {}", p.finish.format("%H:%M")),
        };
        println!(
            "{:>5}  {:<12} created {}  attempts {}  {}",
            entry.id,
            entry.entry_type.to_db_str(),
            entry.created_at,
            entry.sync_attempts,
            detail
        );
    }

    Ok(())
}
