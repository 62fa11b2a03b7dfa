//! Bencode decoding ([BEP-3]).
//!
//! Bencode is the serialization format BitTorrent clients use for `.torrent`
//! files and for their own state files (`resume.dat`, `settings.dat`, ...).
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Decoding is lenient where state files are known to be sloppy and strict
//! where the grammar is unambiguous:
//!
//! - integers may carry leading zeros and have no width limit;
//! - dictionary keys need not be sorted; a repeated key keeps its last value;
//! - byte strings are returned untouched, whatever their content.
//!
//! # Examples
//!
//! ```
//! use datdump::bencode::{decode, Value};
//!
//! let value = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
//! assert_eq!(value.get(b"cow").and_then(Value::as_str), Some("moo"));
//! assert_eq!(value.get(b"spam").and_then(Value::as_str), Some("eggs"));
//! ```
//!
//! # Error Handling
//!
//! Decoding is all-or-nothing. The first problem aborts the call with a
//! [`DecodeError`] carrying the byte offset where it was found:
//!
//! - [`DecodeError::UnexpectedEndOfInput`] - Input ended unexpectedly
//! - [`DecodeError::MalformedInteger`] - No digits, or stray characters, in `i...e`
//! - [`DecodeError::InvalidLengthPrefix`] - Bad `<length>:` prefix
//! - [`DecodeError::InvalidDictKey`] - Dictionary key that is not a byte string
//! - [`DecodeError::UnknownValueTag`] - Byte that cannot start a value
//! - [`DecodeError::EmptyInput`] - Nothing to decode
//! - [`DecodeError::TrailingData`] - Extra data after the value
//! - [`DecodeError::NestingTooDeep`] - Recursion limit exceeded
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod cursor;
mod decode;
mod error;
mod value;

pub use cursor::Cursor;
pub use decode::{decode, decode_prefix, decode_with, DecodeOptions, MAX_DEPTH};
pub use error::DecodeError;
pub use value::Value;
