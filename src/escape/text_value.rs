use num_bigint::BigInt;
use std::collections::BTreeMap;

/// A decoded value with every byte string turned into valid text.
///
/// Same shape as [`crate::bencode::Value`], ready to be rendered as JSON:
/// objects keep their keys sorted, lists keep their order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextValue {
    Integer(BigInt),
    Text(String),
    List(Vec<TextValue>),
    Object(BTreeMap<String, TextValue>),
}

impl TextValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TextValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            TextValue::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TextValue]> {
        match self {
            TextValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, TextValue>> {
        match self {
            TextValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Looks up a key in this value if it is an object.
    pub fn get(&self, key: &str) -> Option<&TextValue> {
        self.as_object()?.get(key)
    }
}

impl From<&str> for TextValue {
    fn from(s: &str) -> Self {
        TextValue::Text(s.to_owned())
    }
}
