//! Text-safe projection of decoded values.
//!
//! State files store names, paths and hashes side by side as raw byte
//! strings. JSON can only hold text, so every byte string is checked:
//!
//! 1. a string containing a control byte (below `0x20`) is escaped;
//! 2. otherwise a valid UTF-8 string is used as is;
//! 3. anything else is escaped.
//!
//! The first rule wins over the second: `"a\nb"` is valid UTF-8 but is
//! still escaped. Escaping uses one [`Scheme`] per run, and a dictionary key
//! whose value was escaped is renamed `key$hex` or `key$base64` so readers
//! know how to get the bytes back.

mod project;
mod scheme;
mod text_value;

pub use project::{needs_escape, Projection, ProjectionStats, Projector};
pub use scheme::{Scheme, SchemeParseError};
pub use text_value::TextValue;

#[cfg(test)]
mod tests;
