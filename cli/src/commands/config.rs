//! Config commands

use crate::config::Config;
use crate::output::OutputFormat;
use crate::ConfigCommands;

const NOT_SET: &str = "(not set)";

pub async fn handle(action: ConfigCommands, profile: Option<&str>) -> Result<(), String> {
    match action {
        ConfigCommands::Init => {
            let config = Config::default();
            config.save(profile)?;
            println!("Configuration initialized at {}", Config::config_path(profile)?.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile)?;
            match key.as_str() {
                "backend_url" => {
                    xeno_sdk::Client::new(value.as_str()).map_err(|e| e.to_string())?;
                    config.backend_url = Some(value);
                }
                "default_format" => {
                    OutputFormat::from_name(&value)?;
                    config.default_format = Some(value);
                }
                _ => return Err(format!("Unknown config key: {}", key)),
            }
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile)?;
            let value = match key.as_str() {
                "backend_url" => config.backend_url,
                "default_format" => config.default_format,
                "session" => config.session.map(|s| format!("{} <{}>", s.name, s.email)),
                _ => return Err(format!("Unknown config key: {}", key)),
            };
            println!("{}: {}", key, value.unwrap_or_else(|| NOT_SET.into()));
        }
        ConfigCommands::List => {
            let config = Config::load(profile)?;
            println!("backend_url: {}", config.backend_url.unwrap_or_else(|| NOT_SET.into()));
            println!("default_format: {}", config.default_format.unwrap_or_else(|| NOT_SET.into()));
            println!(
                "session: {}",
                config
                    .session
                    .map(|s| format!("{} <{}> (customer {})", s.name, s.email, s.customer_id))
                    .unwrap_or_else(|| NOT_SET.into())
            );
        }
    }
    Ok(())
}
