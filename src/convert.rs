//! One-shot conversion from a bencoded state file to JSON text.

use crate::bencode::{self, DecodeError, DecodeOptions, Value};
use crate::escape::{Projector, Scheme, TextValue};
use crate::render::{self, RenderError, RenderOptions};
use thiserror::Error;

/// Errors that can occur while converting a state file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input is not valid bencode.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The projected tree could not be written as JSON.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Everything that controls a conversion, passed explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub scheme: Scheme,
    pub decode: DecodeOptions,
    pub render: RenderOptions,
}

/// Decodes `data` and projects it into a text-safe tree.
pub fn project(data: &[u8], options: &ConvertOptions) -> Result<TextValue, ConvertError> {
    let value = bencode::decode_with(data, &options.decode)?;
    Ok(Projector::new(options.scheme).project(&value))
}

/// Decodes `data` and renders it as JSON.
///
/// ```
/// use datdump::convert::{to_json_string, ConvertOptions};
///
/// let json = to_json_string(b"d4:name4:demo4:sizei42ee", &ConvertOptions::default()).unwrap();
/// assert_eq!(json, "{\n    \"name\": \"demo\",\n    \"size\": 42\n}");
/// ```
pub fn to_json_string(data: &[u8], options: &ConvertOptions) -> Result<String, ConvertError> {
    let text = project(data, options)?;
    Ok(render::to_string_pretty(&text, &options.render)?)
}

/// Lists `(name, path)` for every top-level entry that has a `path` key.
///
/// `resume.dat` maps each torrent file name to a dictionary of settings,
/// one of which is the download `path`. Entries without one (such as the
/// `.fileguard` checksum) are skipped. Names and paths go through
/// `projector`, so a path that is not plain text shows up escaped rather
/// than missing. Results are sorted by name bytes.
pub fn names_and_paths(
    root: &Value,
    projector: &Projector,
) -> Result<Vec<(String, String)>, RenderError> {
    let Some(entries) = root.as_dict() else {
        return Ok(Vec::new());
    };

    let mut listing = Vec::new();
    for (name, props) in entries {
        let Some(path) = props.get(b"path") else {
            continue;
        };

        let path = match path {
            Value::Bytes(b) => projector.project_bytes(b).text,
            Value::Integer(i) => i.to_string(),
            other => {
                let compact = RenderOptions { indent: None };
                render::to_string_pretty(&projector.project(other), &compact)?
            }
        };
        listing.push((projector.project_bytes(name).text, path));
    }

    Ok(listing)
}
