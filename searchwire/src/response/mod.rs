//! Typed response decoding.

mod format;

pub use format::{BinaryFormat, JsonFormat, NoContent, PlainTextFormat, ResponseFormat};
