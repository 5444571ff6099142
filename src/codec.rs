//! # INI Codec
//!
//! Pure conversion between INI text and a typed [`Document`].
//!
//! ## Line Rules
//!
//! Input is split on `\n` and every line is trimmed before it is classified:
//!
//! | Line | Effect |
//! |------|--------|
//! | empty, or starts with `;` / `#` | skipped |
//! | `[name]` | opens section `name` (trimmed; `[]` is the section `""`) |
//! | `key = value` | assigns into the current section, or the globals before any header |
//! | anything else | silently ignored |
//!
//! Comments are whole-line only: `key = a ; b` stores `a ; b`. A header that
//! names an existing section reopens it, so keys from both occurrences merge.
//!
//! ## Output Layout
//!
//! ```text
//! global = 1
//!
//! [Section]
//! key = value
//!
//! [Other]
//! key = value
//! ```
//!
//! Empty sections are skipped and trailing whitespace is trimmed, so an
//! empty document stringifies to `""`.

use std::fmt::Display;

use indexmap::IndexMap;

use crate::domain::{Document, Value};

/// A classified input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Header(&'a str),
    Pair(&'a str, &'a str),
    Skip,
}

/// Trims whitespace and byte-order marks
///
/// NEL (U+0085) is not trimmed: it is Unicode whitespace but not a space
/// separator or line terminator.
fn trim(s: &str) -> &str {
    s.trim_matches(is_trimmable)
}

fn is_trimmable(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

impl<'a> Line<'a> {
    pub(crate) fn classify(raw: &'a str) -> Self {
        let line = trim(raw);

        if line.is_empty() || line.starts_with([';', '#']) {
            return Line::Skip;
        }

        if let Some(inner) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if !inner.contains(']') {
                return Line::Header(trim(inner));
            }
        }

        match line.split_once('=') {
            Some((key, value)) if !key.is_empty() => Line::Pair(trim(key), trim(value)),
            _ => Line::Skip,
        }
    }
}

/// Splits text into classified lines
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.split('\n').map(Line::classify)
}

/// Accumulates the INI layout block by block
#[derive(Default)]
pub(crate) struct IniWriter {
    out: String,
}

impl IniWriter {
    /// Writes one block of `key = value` lines, headed when `header` is set
    pub(crate) fn block<V: Display>(&mut self, header: Option<&str>, entries: &IndexMap<String, V>) {
        if entries.is_empty() {
            return;
        }

        if let Some(name) = header {
            self.out.push_str(&format!("[{}]\n", name));
        }
        for (key, value) in entries {
            self.out.push_str(&format!("{} = {}\n", key, value));
        }
        self.out.push('\n');
    }

    pub(crate) fn finish(self) -> String {
        self.out.trim_end().to_string()
    }
}

/// Parses INI text into a typed document
///
/// Never fails: lines that are neither headers nor assignments are dropped.
pub fn parse(text: &str) -> Document {
    let mut doc = Document::new();
    let mut current: Option<usize> = None;

    for line in tokenize(text) {
        match line {
            Line::Header(name) => {
                let entry = doc.sections.entry(name.to_string());
                current = Some(entry.index());
                entry.or_default();
            }
            Line::Pair(key, raw) => {
                let value = Value::coerce(raw);
                let section = match current {
                    Some(index) => doc.sections.get_index_mut(index).map(|(_, section)| section),
                    None => Some(&mut doc.globals),
                };
                if let Some(section) = section {
                    section.insert(key.to_string(), value);
                }
            }
            Line::Skip => {}
        }
    }

    doc
}

/// Renders a typed document as INI text
///
/// Globals come first without a header, then each non-empty section.
pub fn stringify(doc: &Document) -> String {
    let mut writer = IniWriter::default();

    writer.block(None, &doc.globals);
    for (name, section) in &doc.sections {
        writer.block(Some(name.as_str()), section);
    }

    writer.finish()
}
