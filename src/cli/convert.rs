//! Conversion commands: parse, stringify, fmt

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::output::Output;
use crate::codec;
use crate::domain::Document;
use crate::storage::{Config, IniFile, ParseMode};
use crate::store::IniStore;

/// Picks the parse policy from flags, falling back to the config
pub fn resolve_mode(config: &Config, text: bool, typed: bool) -> ParseMode {
    if text {
        ParseMode::Text
    } else if typed {
        ParseMode::Typed
    } else {
        config.global.parse.mode
    }
}

/// Reads a file, or stdin when the path is absent or `-`
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read input file: {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Parses INI with the given policy and renders the result as INI again
fn normalize(input: &str, mode: ParseMode) -> String {
    match mode {
        ParseMode::Typed => codec::stringify(&codec::parse(input)),
        ParseMode::Text => {
            let mut store = IniStore::new();
            store.parse(input);
            store.stringify()
        }
    }
}

pub fn parse(output: &Output, config: &Config, file: Option<&Path>, mode: ParseMode) -> Result<()> {
    let input = read_input(file)?;
    output.verbose_ctx(
        "parse",
        &format!("Read {} bytes, mode={}", input.len(), mode.as_str()),
    );

    match mode {
        ParseMode::Typed => {
            let doc = codec::parse(&input);
            output.verbose_ctx(
                "parse",
                &format!(
                    "{} globals, {} sections",
                    doc.globals.len(),
                    doc.sections.len()
                ),
            );
            output.document(&doc, &config.global.json)
        }
        ParseMode::Text => {
            let mut store = IniStore::new();
            let doc = store.parse(&input);
            output.verbose_ctx("parse", &format!("{} sections", doc.len()));
            output.document(doc, &config.global.json)
        }
    }
}

pub fn stringify(output: &Output, file: Option<&Path>) -> Result<()> {
    let input = read_input(file)?;
    let json: serde_json::Value = serde_json::from_str(&input).context("Failed to parse JSON input")?;
    let doc = Document::from_json(json).context("Failed to convert JSON to INI")?;

    output.verbose_ctx(
        "stringify",
        &format!(
            "{} globals, {} sections",
            doc.globals.len(),
            doc.sections.len()
        ),
    );

    output.text("ini", &codec::stringify(&doc));
    Ok(())
}

pub fn fmt(output: &Output, file: Option<&Path>, mode: ParseMode, write: bool) -> Result<()> {
    if write && file.map_or(true, |p| p == Path::new("-")) {
        bail!("--write needs a file path, not stdin");
    }

    let input = read_input(file)?;
    let formatted = normalize(&input, mode);

    match file {
        Some(path) if write => {
            let ini = IniFile::new(path);
            ini.write_text(&formatted)?;
            output.verbose_ctx("fmt", &format!("Rewrote {}", ini.path().display()));
            output.success(&format!("Formatted {}", path.display()));
        }
        _ => output.text("ini", &formatted),
    }

    Ok(())
}
