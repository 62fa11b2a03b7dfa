use super::scheme::Scheme;
use super::text_value::TextValue;
use crate::bencode::Value;
use bytes::Bytes;
use std::collections::BTreeMap;

/// Returns `true` if `bytes` contains a control byte (below ASCII space).
///
/// Such strings are always escaped, even when they are valid UTF-8.
pub fn needs_escape(bytes: &[u8]) -> bool {
    bytes.iter().any(|&b| b < b' ')
}

/// Text produced for one byte string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub text: String,
    /// Whether the configured scheme was applied.
    pub escaped: bool,
}

/// Counters collected while projecting a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionStats {
    /// Byte strings visited, keys included.
    pub strings: usize,
    /// Byte strings that went through the escaping scheme.
    pub escaped: usize,
    /// Keys that received a `$<scheme>` suffix.
    pub tagged_keys: usize,
    /// Entries dropped because two keys projected to the same text.
    pub collisions: usize,
}

/// Rewrites a [`Value`] tree into a [`TextValue`] tree.
///
/// Each byte string is kept as text when it has no control bytes and is
/// valid UTF-8; otherwise it is escaped with the configured [`Scheme`].
/// When a dictionary value is escaped, its key gets a `$<scheme>` suffix so
/// the escaping can be reversed (none for [`Scheme::Raw`]).
///
/// # Examples
///
/// ```
/// use datdump::bencode::decode;
/// use datdump::escape::{Projector, Scheme};
///
/// let value = decode(b"d4:hash2:\x01\xff4:name4:demoe").unwrap();
/// let text = Projector::new(Scheme::Hex).project(&value);
///
/// assert_eq!(text.get("hash$hex").and_then(|v| v.as_text()), Some("01ff"));
/// assert_eq!(text.get("name").and_then(|v| v.as_text()), Some("demo"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Projector {
    scheme: Scheme,
}

impl Projector {
    pub fn new(scheme: Scheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn project(&self, value: &Value) -> TextValue {
        self.project_with_stats(value).0
    }

    pub fn project_with_stats(&self, value: &Value) -> (TextValue, ProjectionStats) {
        let mut stats = ProjectionStats::default();
        let text = self.project_value(value, &mut stats);
        tracing::debug!(
            scheme = %self.scheme,
            strings = stats.strings,
            escaped = stats.escaped,
            tagged_keys = stats.tagged_keys,
            "projected {} tree",
            value.kind()
        );
        (text, stats)
    }

    /// Projects a single byte string.
    pub fn project_bytes(&self, bytes: &[u8]) -> Projection {
        if !needs_escape(bytes) {
            if let Ok(text) = std::str::from_utf8(bytes) {
                return Projection {
                    text: text.to_owned(),
                    escaped: false,
                };
            }
        }

        tracing::trace!(len = bytes.len(), scheme = %self.scheme, "escaping byte string");
        Projection {
            text: self.scheme.escape(bytes),
            escaped: true,
        }
    }

    fn project_value(&self, value: &Value, stats: &mut ProjectionStats) -> TextValue {
        match value {
            Value::Integer(i) => TextValue::Integer(i.clone()),
            Value::Bytes(b) => TextValue::Text(self.project_counted(b, stats).text),
            Value::List(l) => TextValue::List(
                l.iter()
                    .map(|item| self.project_value(item, stats))
                    .collect(),
            ),
            Value::Dict(d) => TextValue::Object(self.project_dict(d, stats)),
        }
    }

    fn project_dict(
        &self,
        dict: &BTreeMap<Bytes, Value>,
        stats: &mut ProjectionStats,
    ) -> BTreeMap<String, TextValue> {
        let mut object = BTreeMap::new();

        for (key, value) in dict {
            let key_text = self.project_counted(key, stats).text;

            let (text, escaped) = match value {
                Value::Bytes(b) => {
                    let projection = self.project_counted(b, stats);
                    (TextValue::Text(projection.text), projection.escaped)
                }
                other => (self.project_value(other, stats), false),
            };

            let key_text = match self.scheme.suffix() {
                Some(suffix) if escaped => {
                    stats.tagged_keys += 1;
                    format!("{key_text}${suffix}")
                }
                _ => key_text,
            };

            if object.insert(key_text.clone(), text).is_some() {
                stats.collisions += 1;
                tracing::warn!(
                    key = %key_text,
                    "dictionary keys collide after escaping, keeping the later entry"
                );
            }
        }

        object
    }

    fn project_counted(&self, bytes: &[u8], stats: &mut ProjectionStats) -> Projection {
        let projection = self.project_bytes(bytes);
        stats.strings += 1;
        if projection.escaped {
            stats.escaped += 1;
        }
        projection
    }
}
