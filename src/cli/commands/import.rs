use crate::cli::commands::{open_pool, resolve_context};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::capture::{import_legacy_period, LegacyImport};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::{parse_date, require_time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        date,
        start,
        finish,
        break_minutes,
        project,
        on_equipment,
        allowances,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;

        let id = import_legacy_period(
            &mut pool,
            LegacyImport {
                owner_id: cfg.owner_id.clone(),
                date: parse_date(date)?,
                start: require_time(start)?,
                finish: require_time(finish)?,
                total_break_minutes: *break_minutes,
                context: resolve_context(cfg, project, on_equipment),
                allowances: allowances.clone(),
            },
        )?;

        success(format!(
            "Legacy record imported with allocated breaks (entry {}).",
            id
        ));
    }
    Ok(())
}
