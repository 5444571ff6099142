//! INI files on disk
//!
//! Loads a file into an [`IniStore`] and writes it back. Writes go to a
//! locked temp file first and are renamed over the target.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::store::IniStore;

/// An INI file backing an [`IniStore`]
pub struct IniFile {
    path: PathBuf,
}

impl IniFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw file contents
    ///
    /// A missing file reads as empty so `set` can create new files.
    pub fn read_text(&self) -> Result<String> {
        if !self.path.exists() {
            return Ok(String::new());
        }

        let mut file = fs::File::open(&self.path)
            .with_context(|| format!("Failed to open INI file: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on INI file")?;

        let mut text = String::new();
        file.read_to_string(&mut text)
            .with_context(|| format!("Failed to read INI file: {}", self.path.display()))?;

        Ok(text)
    }

    /// Loads the file into a fresh store
    pub fn load(&self) -> Result<IniStore> {
        let text = self.read_text()?;
        let mut store = IniStore::new();
        store.parse(&text);
        Ok(store)
    }

    /// Saves the store's rendering, followed by a newline
    pub fn save(&self, store: &IniStore) -> Result<()> {
        self.write_text(&store.stringify())
    }

    /// Replaces the file contents atomically
    pub fn write_text(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on INI file")?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(text.as_bytes())
                .context("Failed to write INI file")?;
            if !text.is_empty() {
                writer.write_all(b"\n").context("Failed to write INI file")?;
            }
            writer.flush().context("Failed to flush INI file")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
