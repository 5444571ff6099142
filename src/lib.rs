//! inijson - Convert between INI configuration text and JSON-shaped documents
//!
//! Two ways in:
//! - [`codec::parse`] / [`codec::stringify`], pure functions over a typed
//!   [`Document`] whose values are coerced to booleans, numbers or strings
//! - [`IniStore`], a stateful wrapper with get/set/delete that keeps every
//!   value as a string

pub mod domain;
pub mod codec;
pub mod store;
pub mod storage;
pub mod cli;

pub use domain::{ConvertError, Document, Section, Value};
pub use store::{IniStore, TextDocument, TextSection};
