use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            info(format!("Config file: {}", path.display()));
            if path.exists() {
                print!("{}", std::fs::read_to_string(&path)?);
            } else {
                warning("No config file found; defaults are in effect.");
            }
        }

        if *check {
            if cfg.remote_url.is_empty() {
                warning("remote_url is empty: sync will fail until it is set.");
            }
            if cfg.api_token.is_empty() {
                warning("api_token is empty: the remote store may reject requests.");
            }
            if cfg.owner_id.is_empty() {
                warning("owner_id is empty: clock events need an owner.");
            }
            success("Configuration check complete.");
        }
    }
    Ok(())
}
