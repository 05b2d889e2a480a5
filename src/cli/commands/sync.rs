use crate::cli::commands::open_pool;
use crate::config::Config;
use crate::core::sync::SyncEngine;
use crate::db::catalog::load_catalog;
use crate::errors::{AppError, AppResult};
use crate::remote::HttpRemote;
use crate::ui::messages::{info, success, warning};

pub fn handle(cfg: &Config) -> AppResult<()> {
    if cfg.remote_url.is_empty() {
        return Err(AppError::Config(
            "remote_url is not set; see 'fieldsync config --check'".into(),
        ));
    }

    let mut pool = open_pool(cfg)?;
    let catalog = load_catalog(&pool.conn)?;
    let remote = HttpRemote::from_config(cfg)?;

    let summary = SyncEngine::run(&mut pool, &remote, &catalog)?;

    success(format!(
        "Sync complete: {} succeeded, {} failed, {} unresolved.",
        summary.succeeded, summary.failed, summary.unresolved
    ));

    for issue in &summary.issues {
        warning(format!(
            "entry {} [{}]: {}",
            issue.entry_id,
            issue.kind.as_str(),
            issue.message
        ));
    }

    if summary.succeeded == 0 && summary.failed == 0 && summary.unresolved == 0 {
        info("Queue was empty; nothing to do.");
    }

    Ok(())
}
