//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{config_cmd, convert, edit};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "inijson")]
#[command(author, version, about = "Convert between INI configuration text and JSON")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured `default_format`)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to the configuration file
    #[arg(long, global = true, env = "INIJSON_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert INI to JSON
    Parse {
        /// INI file to read (stdin when omitted or `-`)
        file: Option<PathBuf>,

        /// Keep every value as a string and group leading keys under `default`
        #[arg(long)]
        text: bool,

        /// Coerce booleans and numbers (overrides a `text` config default)
        #[arg(long, conflicts_with = "text")]
        typed: bool,
    },

    /// Convert JSON to INI
    Stringify {
        /// JSON file to read (stdin when omitted or `-`)
        file: Option<PathBuf>,
    },

    /// Normalize an INI file (parse, then stringify)
    Fmt {
        /// INI file to read (stdin when omitted or `-`)
        file: Option<PathBuf>,

        /// Keep every value as a string and group leading keys under `default`
        #[arg(long)]
        text: bool,

        /// Coerce booleans and numbers (overrides a `text` config default)
        #[arg(long, conflicts_with = "text")]
        typed: bool,

        /// Rewrite the file in place instead of printing
        #[arg(long, short = 'w', requires = "file")]
        write: bool,
    },

    /// Print a single value
    Get {
        /// INI file
        file: PathBuf,
        /// Section name
        section: String,
        /// Key name
        key: String,
    },

    /// Set a value, creating the section if needed
    Set {
        /// INI file (created if missing)
        file: PathBuf,
        /// Section name
        section: String,
        /// Key name
        key: String,
        /// New value
        value: String,
    },

    /// Delete a key, or a whole section when no key is given
    Delete {
        /// INI file
        file: PathBuf,
        /// Section name
        section: String,
        /// Key name
        key: Option<String>,
    },

    /// Inspect or initialize configuration
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let format = cli
        .format
        .unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("inijson starting");
    output.verbose_ctx(
        "config",
        &format!(
            "Using config: {}",
            config
                .path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<defaults>".to_string())
        ),
    );

    match cli.command {
        Commands::Parse { file, text, typed } => {
            let mode = convert::resolve_mode(&config, text, typed);
            convert::parse(&output, &config, file.as_deref(), mode)?
        }
        Commands::Stringify { file } => convert::stringify(&output, file.as_deref())?,
        Commands::Fmt { file, text, typed, write } => {
            let mode = convert::resolve_mode(&config, text, typed);
            convert::fmt(&output, file.as_deref(), mode, write)?
        }

        Commands::Get { file, section, key } => edit::get(&output, &file, &section, &key)?,
        Commands::Set { file, section, key, value } => {
            edit::set(&output, &file, &section, &key, &value)?
        }
        Commands::Delete { file, section, key } => {
            edit::delete(&output, &file, &section, key.as_deref())?
        }

        Commands::Config(cmd) => config_cmd::run(cmd, &output, config)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
