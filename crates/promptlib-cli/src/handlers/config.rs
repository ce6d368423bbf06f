//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::{Config, PROJECT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use serde_json::json;
use std::path::PathBuf;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Init(init_args) => {
            let target = if init_args.user {
                Config::user_config_path()
                    .ok_or_else(|| Error::config("Unable to determine user config directory"))?
            } else {
                PathBuf::from(PROJECT_CONFIG_FILE)
            };
            handle_config_init(init_args, target, output)
        }
        ConfigAction::Path => handle_config_path(config, output),
    }
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = match args.format {
        ConfigFormat::Toml => config.to_toml()?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)? + "\n",
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    output.write(&content)
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, target: PathBuf, output: &mut OutputWriter) -> Result<()> {
    if target.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            target.display()
        ))?;
        return Ok(());
    }

    let defaults = Config {
        prompts_dir: Some(PathBuf::from("prompts")),
        ..Config::default()
    };
    defaults.save(&target)?;

    output.success(&format!("✓ Created config at {}", target.display()))?;
    output.info("Edit it to customize settings for your environment.")
}

/// Handle config path subcommand
fn handle_config_path(config: &Config, output: &mut OutputWriter) -> Result<()> {
    if !output.is_human() {
        return output.data(&json!({
            "source": config.source,
            "searched": Config::default_config_paths(),
        }));
    }

    match &config.source {
        Some(path) => output.writeln(&path.display().to_string()),
        None => {
            output.info("No configuration file found; using defaults")?;
            output.info("Searched:")?;
            for path in Config::default_config_paths() {
                output.info(&format!("  {}", path.display()))?;
            }
            Ok(())
        }
    }
}
