//! Config CLI commands

use anyhow::{bail, Result};
use clap::Subcommand;

use super::output::Output;
use crate::storage::Config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommands, output: &Output, config: Config) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(output, &config),
        ConfigCommands::Path => path(output, &config),
        ConfigCommands::Init { force } => init(output, config, force),
    }
}

fn show(output: &Output, config: &Config) -> Result<()> {
    if output.is_json() {
        output.data(&config.global);
    } else {
        println!("{}", config.to_toml()?.trim_end());
    }
    Ok(())
}

fn path(output: &Output, config: &Config) -> Result<()> {
    let Some(path) = config.path.as_deref() else {
        bail!("Could not determine config directory");
    };

    let exists = path.exists();
    if output.is_json() {
        output.data(&serde_json::json!({
            "path": path.display().to_string(),
            "exists": exists,
        }));
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

fn init(output: &Output, config: Config, force: bool) -> Result<()> {
    let config = Config {
        global: Default::default(),
        ..config
    };

    if let Some(path) = config.path.as_deref() {
        if path.exists() && !force {
            bail!(
                "Config already exists at {} (use --force to overwrite)",
                path.display()
            );
        }
    }

    config.save()?;

    let shown = config
        .path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    output.success(&format!("Wrote default config to {}", shown));
    Ok(())
}
