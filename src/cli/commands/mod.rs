pub mod add;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod db;
pub mod import;
pub mod init;
pub mod log;
pub mod status;
pub mod sync;

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::payload::WorkContext;

/// Open the configured database.
pub fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    Ok(DbPool::new(&cfg.database)?)
}

/// Resolve the work context from `--project` / `--on-equipment`, falling
/// back to the configured default project.
pub fn resolve_context(
    cfg: &Config,
    project: &Option<String>,
    on_equipment: &Option<String>,
) -> WorkContext {
    if let Some(number) = on_equipment {
        WorkContext::Equipment {
            number: number.clone(),
        }
    } else {
        WorkContext::Project {
            code: project.clone().unwrap_or_else(|| cfg.default_project.clone()),
        }
    }
}

/// Parse a break spec of the form HH:MM-HH:MM[:REASON].
pub fn parse_break_spec(
    spec: &str,
    position: i32,
) -> AppResult<crate::models::payload::BreakInterval> {
    use crate::utils::time::require_time;

    let (lhs, rhs) = spec
        .split_once('-')
        .ok_or_else(|| AppError::InvalidBreak(spec.to_string()))?;

    let start = require_time(lhs.trim())?;

    let parts: Vec<&str> = rhs.split(':').collect();
    if parts.len() < 2 {
        return Err(AppError::InvalidBreak(spec.to_string()));
    }
    let finish = require_time(&format!("{}:{}", parts[0].trim(), parts[1].trim()))?;
    let reason = if parts.len() > 2 {
        parts[2..].join(":")
    } else {
        "Break".to_string()
    };

    if finish <= start {
        return Err(AppError::InvalidBreak(format!(
            "{}: finish must be later than start",
            spec
        )));
    }

    Ok(crate::models::payload::BreakInterval {
        start,
        finish,
        reason,
        position,
    })
}
