//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Convert | INI <-> JSON | `parse`, `stringify`, `fmt` |
//! | Edit | Change one value in a file | `get`, `set`, `delete` |
//! | Config | Settings | `config show`, `config path`, `config init` |
//!
//! `parse` and `fmt` coerce values by default; `--text` switches to the
//! string-only store policy. `get`/`set`/`delete` always use the store.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! inijson --verbose parse app.ini
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod convert;
mod edit;
mod config_cmd;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
