use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd {
        if *print {
            let pool = open_pool(cfg)?;
            for (date, operation, message) in load_log(&pool.conn)? {
                println!("{}  [{}]  {}", date, operation, message);
            }
        }
    }
    Ok(())
}
