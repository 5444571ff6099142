//! Stateful INI store with CRUD accessors
//!
//! Unlike [`crate::codec`], the store never coerces: every value is kept as
//! the trimmed string it was parsed from, and [`IniStore::set`] stores the
//! caller's value through its `Display` form.

use std::fmt::Display;

use indexmap::IndexMap;

use crate::codec::{tokenize, IniWriter, Line};

/// Section that collects keys appearing before any header
pub const DEFAULT_SECTION: &str = "default";

/// Ordered string key/value pairs of one section
pub type TextSection = IndexMap<String, String>;

/// String-only document held by an [`IniStore`]
pub type TextDocument = IndexMap<String, TextSection>;

/// Owns one [`TextDocument`] and exposes get/set/delete over it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniStore {
    data: TextDocument,
}

impl IniStore {
    /// Creates a store with an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text`, replacing the current document
    ///
    /// Keys before the first header land in [`DEFAULT_SECTION`], which is
    /// dropped again if it ends up empty.
    pub fn parse(&mut self, text: &str) -> &TextDocument {
        self.data = TextDocument::new();
        let mut current = DEFAULT_SECTION.to_string();

        for line in tokenize(text) {
            match line {
                Line::Header(name) => {
                    current = name.to_string();
                    self.data.entry(current.clone()).or_default();
                }
                Line::Pair(key, value) => {
                    self.data
                        .entry(current.clone())
                        .or_default()
                        .insert(key.to_string(), value.to_string());
                }
                Line::Skip => {}
            }
        }

        if self.data.get(DEFAULT_SECTION).is_some_and(|s| s.is_empty()) {
            self.data.shift_remove(DEFAULT_SECTION);
        }

        &self.data
    }

    /// Returns the value stored under `section`/`key`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.data.get(section)?.get(key).map(String::as_str)
    }

    /// Stores `value` as a string, creating the section if needed
    pub fn set(&mut self, section: &str, key: &str, value: impl Display) {
        self.data
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Deletes a key, or the whole section when `key` is `None`
    ///
    /// Removing the last key of a section removes the section too.
    /// Returns false when nothing matched.
    pub fn delete(&mut self, section: &str, key: Option<&str>) -> bool {
        let Some(entries) = self.data.get_mut(section) else {
            return false;
        };

        let Some(key) = key else {
            self.data.shift_remove(section);
            return true;
        };

        if entries.shift_remove(key).is_none() {
            return false;
        }
        if entries.is_empty() {
            self.data.shift_remove(section);
        }
        true
    }

    /// Returns the live document
    pub fn to_json(&self) -> &TextDocument {
        &self.data
    }

    /// Returns a detached JSON copy of the document
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.data
                .iter()
                .map(|(name, section)| {
                    let entries = section
                        .iter()
                        .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                        .collect();
                    (name.clone(), serde_json::Value::Object(entries))
                })
                .collect(),
        )
    }

    /// Consumes the store, returning its document
    pub fn into_document(self) -> TextDocument {
        self.data
    }

    /// Renders the document as INI text, skipping empty sections
    pub fn stringify(&self) -> String {
        let mut writer = IniWriter::default();
        for (name, section) in &self.data {
            writer.block(Some(name.as_str()), section);
        }
        writer.finish()
    }
}

impl From<TextDocument> for IniStore {
    fn from(data: TextDocument) -> Self {
        Self { data }
    }
}
