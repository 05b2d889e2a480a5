use crate::cli::commands::{open_pool, parse_break_spec, resolve_context};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::capture::enqueue_work_period;
use crate::errors::AppResult;
use crate::models::payload::WorkPeriodPayload;
use crate::ui::messages::success;
use crate::utils::time::{parse_date, require_time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        start,
        finish,
        project,
        on_equipment,
        breaks,
        equipment,
        mobilised,
        allowances,
        status,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;

        let mut intervals = Vec::new();
        for (i, spec) in breaks.iter().enumerate() {
            intervals.push(parse_break_spec(spec, i as i32)?);
        }

        let payload = WorkPeriodPayload {
            owner_id: cfg.owner_id.clone(),
            date: parse_date(date)?,
            start: require_time(start)?,
            finish: require_time(finish)?,
            context: resolve_context(cfg, project, on_equipment),
            status: status.clone().unwrap_or_else(|| "submitted".to_string()),
            allowances: allowances.clone(),
            gps: None,
            breaks: intervals,
            used_equipment: equipment.clone(),
            mobilised_equipment: mobilised.clone(),
        };

        let id = enqueue_work_period(&mut pool, payload)?;
        success(format!("Work period queued (entry {}).", id));
    }
    Ok(())
}
