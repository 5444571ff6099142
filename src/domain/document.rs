//! Typed document model
//!
//! A [`Document`] maps section names to [`Section`]s and keeps any keys that
//! appeared before the first header as top-level globals. Both levels keep
//! insertion order.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::value::Value;

/// Ordered key/value pairs of one section
pub type Section = IndexMap<String, Value>;

#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
    #[error("Expected a JSON object at the top level, got {0}")]
    NotAnObject(&'static str),

    #[error("Arrays are not supported: top-level key '{0}'")]
    TopLevelArray(String),

    #[error("Value of [{section}] {key} is {kind}; only scalars are allowed")]
    Nested {
        section: String,
        key: String,
        kind: &'static str,
    },
}

/// A parsed configuration with typed values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Keys that appear before any section header
    pub globals: Section,

    /// Named sections in order of first appearance
    pub sections: IndexMap<String, Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when there are no globals and no sections
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.sections.is_empty()
    }

    /// Returns a section by name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Returns a section by name, creating it if absent
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    /// Looks up a value inside a section
    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.sections.get(section)?.get(key)
    }

    /// Looks up a top-level value
    pub fn global(&self, key: &str) -> Option<&Value> {
        self.globals.get(key)
    }

    /// Inserts a value, creating the section if needed
    pub fn insert(&mut self, section: &str, key: &str, value: impl Into<Value>) {
        self.section_mut(section).insert(key.to_string(), value.into());
    }

    /// Inserts a top-level value
    pub fn insert_global(&mut self, key: &str, value: impl Into<Value>) {
        self.globals.insert(key.to_string(), value.into());
    }

    /// Removes a whole section, keeping the order of the others
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    /// Builds a document from a JSON object
    ///
    /// Object members become sections, scalar members become globals.
    /// `null` maps to an empty string.
    pub fn from_json(json: serde_json::Value) -> Result<Self, ConvertError> {
        let root = match json {
            serde_json::Value::Object(map) => map,
            other => return Err(ConvertError::NotAnObject(json_kind(&other))),
        };

        let mut doc = Document::new();

        for (name, member) in root {
            match member {
                serde_json::Value::Object(entries) => {
                    let section = doc.section_mut(&name);
                    for (key, value) in entries {
                        let value = scalar(value).map_err(|kind| ConvertError::Nested {
                            section: name.clone(),
                            key: key.clone(),
                            kind,
                        })?;
                        section.insert(key, value);
                    }
                }
                serde_json::Value::Array(_) => return Err(ConvertError::TopLevelArray(name)),
                other => {
                    // Only arrays and objects fail in scalar()
                    if let Ok(value) = scalar(other) {
                        doc.globals.insert(name, value);
                    }
                }
            }
        }

        Ok(doc)
    }
}

fn scalar(json: serde_json::Value) -> Result<Value, &'static str> {
    match json {
        serde_json::Value::Null => Ok(Value::Str(String::new())),
        serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_json::Value::Number(n) => Ok(Value::Num(n.as_f64().unwrap_or(f64::NAN))),
        serde_json::Value::String(s) => Ok(Value::Str(s)),
        other => Err(json_kind(&other)),
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl Serialize for Document {
    /// Serializes as one JSON object: globals first, then sections.
    /// A global shadowed by a section of the same name is left out.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let visible: Vec<_> = self
            .globals
            .iter()
            .filter(|(key, _)| !self.sections.contains_key(*key))
            .collect();

        let mut map = serializer.serialize_map(Some(visible.len() + self.sections.len()))?;
        for (key, value) in visible {
            map.serialize_entry(key, value)?;
        }
        for (name, section) in &self.sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}
