//! In-place edit commands: get, set, delete
//!
//! These go through [`IniStore`](crate::store::IniStore), so files are read
//! and written with string values and no type coercion.

use std::path::Path;

use anyhow::{bail, Result};

use super::output::Output;
use crate::storage::IniFile;

pub fn get(output: &Output, file: &Path, section: &str, key: &str) -> Result<()> {
    let store = IniFile::new(file).load()?;

    let Some(value) = store.get(section, key) else {
        bail!("Key '{}' not found in section '{}'", key, section);
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "section": section,
            "key": key,
            "value": value,
        }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

pub fn set(output: &Output, file: &Path, section: &str, key: &str, value: &str) -> Result<()> {
    let ini = IniFile::new(file);
    let mut store = ini.load()?;

    let previous = store.get(section, key).map(str::to_string);
    store.set(section, key, value);
    ini.save(&store)?;

    output.verbose_ctx(
        "set",
        &format!("[{}] {}: {:?} -> {:?}", section, key, previous, value),
    );
    output.success(&format!("Set [{}] {} = {}", section, key, value));
    Ok(())
}

pub fn delete(output: &Output, file: &Path, section: &str, key: Option<&str>) -> Result<()> {
    let ini = IniFile::new(file);
    let mut store = ini.load()?;

    let target = match key {
        Some(k) => format!("[{}] {}", section, k),
        None => format!("[{}]", section),
    };

    if !store.delete(section, key) {
        output.verbose_ctx("delete", &format!("{} not present, file left untouched", target));
        if output.is_json() {
            output.data(&serde_json::json!({ "deleted": false, "target": target }));
        } else {
            println!("Nothing to delete: {} not found", target);
        }
        return Ok(());
    }

    ini.save(&store)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "deleted": true, "target": target }));
    } else {
        output.success(&format!("Deleted {}", target));
    }
    Ok(())
}
