//! datdump - readable JSON from bencoded client state files
//!
//! BitTorrent clients such as uTorrent keep their state (`resume.dat`,
//! `settings.dat`, ...) as bencode. This crate decodes those files and turns
//! them into JSON without losing anything: byte strings that are not plain
//! text are escaped, and the escaping is recorded in the key name.
//!
//! # Modules
//!
//! - [`bencode`] - Cursor, decoder and the decoded [`Value`] tree
//! - [`escape`] - Text-safety rules, escaping [`Scheme`]s and the [`Projector`]
//! - [`render`] - JSON output with sorted keys and exact integers
//! - [`convert`] - The whole pipeline in one call
//!
//! # Example
//!
//! ```
//! use datdump::{decode, Projector, Scheme};
//!
//! let value = decode(b"d4:hash4:\xde\xad\xbe\xef4:name4:demoe").unwrap();
//! let text = Projector::new(Scheme::Base64).project(&value);
//!
//! assert_eq!(text.get("name").and_then(|v| v.as_text()), Some("demo"));
//! assert_eq!(text.get("hash$base64").and_then(|v| v.as_text()), Some("3q2+7w=="));
//! ```

pub mod bencode;
pub mod convert;
pub mod escape;
pub mod render;

pub use bencode::{decode, decode_prefix, DecodeError, DecodeOptions, Value};
pub use convert::{ConvertError, ConvertOptions};
pub use escape::{Projector, Scheme, TextValue};
pub use render::{RenderError, RenderOptions};
