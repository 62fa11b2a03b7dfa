//! JSON rendering of projected trees.
//!
//! Keys come out sorted (objects are `BTreeMap`s) and integers are written
//! digit for digit, however large, thanks to serde_json's
//! `arbitrary_precision` feature.

use crate::escape::TextValue;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io;
use thiserror::Error;

/// Indentation used when none is requested.
pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level, or `None` for single-line output.
    pub indent: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: Some(DEFAULT_INDENT),
        }
    }
}

/// Converts a projected tree into a `serde_json::Value`.
pub fn to_json(value: &TextValue) -> Result<serde_json::Value, RenderError> {
    Ok(match value {
        TextValue::Integer(i) => serde_json::Value::Number(i.to_string().parse()?),
        TextValue::Text(s) => serde_json::Value::String(s.clone()),
        TextValue::List(l) => {
            serde_json::Value::Array(l.iter().map(to_json).collect::<Result<_, _>>()?)
        }
        TextValue::Object(o) => {
            let mut map = serde_json::Map::new();
            for (key, item) in o {
                map.insert(key.clone(), to_json(item)?);
            }
            serde_json::Value::Object(map)
        }
    })
}

/// Writes `value` as JSON to `writer`.
pub fn write_pretty<W: io::Write>(
    mut writer: W,
    value: &TextValue,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let json = to_json(value)?;

    match options.indent {
        Some(width) => {
            let indent = vec![b' '; width];
            let formatter = PrettyFormatter::with_indent(&indent);
            let mut ser = Serializer::with_formatter(&mut writer, formatter);
            json.serialize(&mut ser)?;
        }
        None => serde_json::to_writer(&mut writer, &json)?,
    }

    writer.flush()?;
    Ok(())
}

/// Renders `value` as a JSON string.
///
/// ```
/// use datdump::bencode::decode;
/// use datdump::escape::Projector;
/// use datdump::render::{to_string_pretty, RenderOptions};
///
/// let value = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
/// let text = Projector::default().project(&value);
/// let json = to_string_pretty(&text, &RenderOptions { indent: None }).unwrap();
/// assert_eq!(json, r#"{"cow":"moo","spam":"eggs"}"#);
/// ```
pub fn to_string_pretty(
    value: &TextValue,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let json = to_json(value)?;

    let Some(width) = options.indent else {
        return Ok(serde_json::to_string(&json)?);
    };

    let indent = vec![b' '; width];
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    json.serialize(&mut ser)?;
    // serde_json writes UTF-8 only.
    Ok(String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)?)
}
