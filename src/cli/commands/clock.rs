use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::capture::{enqueue_clock_in, enqueue_clock_out};
use crate::errors::AppResult;
use crate::models::payload::{ClockInPayload, ClockOutPayload, GpsFix};
use crate::ui::messages::success;
use crate::utils::time::{parse_date, require_time};
use chrono::{Local, NaiveDate};

fn resolve_date(date: &Option<String>) -> AppResult<NaiveDate> {
    match date {
        Some(d) => parse_date(d),
        None => Ok(Local::now().date_naive()),
    }
}

fn gps(lat: &Option<f64>, lon: &Option<f64>) -> Option<GpsFix> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Some(GpsFix {
            lat: *lat,
            lon: *lon,
        }),
        _ => None,
    }
}

pub fn handle_in(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::ClockIn {
        date,
        time,
        lat,
        lon,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;
        let start = require_time(time)?;

        let id = enqueue_clock_in(
            &mut pool,
            ClockInPayload {
                owner_id: cfg.owner_id.clone(),
                date: resolve_date(date)?,
                start,
                gps: gps(lat, lon),
            },
        )?;

        success(format!("Clock-in queued (entry {}).", id));
    }
    Ok(())
}

pub fn handle_out(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::ClockOut {
        date,
        time,
        record_id,
        clock_in_entry,
        lat,
        lon,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;
        let finish = require_time(time)?;

        let id = enqueue_clock_out(
            &mut pool,
            ClockOutPayload {
                owner_id: cfg.owner_id.clone(),
                date: resolve_date(date)?,
                finish,
                gps: gps(lat, lon),
                server_record_id: record_id.clone(),
                local_clock_in_id: *clock_in_entry,
            },
        )?;

        success(format!("Clock-out queued (entry {}).", id));
    }
    Ok(())
}
