//! # Storage Layer
//!
//! File-backed pieces of inijson. The codec and store never touch the disk;
//! everything that does lives here.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Documents | INI | any path given on the command line |
//! | Config | TOML | `~/.config/inijson/config.toml` |
//!
//! Writes are atomic (temp file + rename) and hold an `fs2` lock while the
//! temp file is written.

mod config;
mod ini_file;

pub use config::{Config, ConfigError, GlobalConfig, JsonConfig, OutputFormat, ParseConfig, ParseMode};
pub use ini_file::IniFile;
