use anyhow::Result;

use crate::output::print_json;
use switchboard_core::config::Config;

/// Print the configuration as resolved from the environment.
pub fn run(json: bool) -> Result<()> {
    let config = Config::from_env();

    if json {
        return print_json(&config);
    }

    println!("port: {}", config.port);
    println!("hr_base_url: {}", config.hr_base_url);
    println!("request_timeout_secs: {}", config.request_timeout_secs);
    Ok(())
}
