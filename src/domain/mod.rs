//! Domain models for inijson
//!
//! Typed values and the document they live in, without any I/O concerns.

mod document;
mod value;

pub use document::{ConvertError, Document, Section};
pub use value::{format_number, Value};
