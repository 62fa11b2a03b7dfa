use thiserror::Error;

/// Errors produced while decoding bencoded input.
///
/// Every variant carries the byte offset at which decoding stopped, so a
/// caller can point at the damaged region of a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input ended while a token or payload byte was still required.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEndOfInput { offset: usize },

    /// An `i...e` integer had no digits or contained invalid characters.
    #[error("malformed integer at offset {offset}: {reason}")]
    MalformedInteger { offset: usize, reason: String },

    /// A byte-string length prefix was missing or not a decimal number.
    #[error("invalid string length prefix at offset {offset}")]
    InvalidLengthPrefix { offset: usize },

    /// A dictionary key decoded to something other than a byte string.
    #[error("dictionary key at offset {offset} is not a byte string")]
    InvalidDictKey { offset: usize },

    /// The leading byte of a value matched no known production.
    #[error("unknown value tag {tag:#04x} at offset {offset}")]
    UnknownValueTag { offset: usize, tag: u8 },

    /// The input contained no value at all.
    #[error("empty input")]
    EmptyInput,

    /// Bytes remained after the top-level value in strict mode.
    #[error("trailing data after value at offset {offset}")]
    TrailingData { offset: usize },

    /// Lists and dictionaries were nested deeper than the configured limit.
    #[error("nesting deeper than {max_depth} levels at offset {offset}")]
    NestingTooDeep { offset: usize, max_depth: usize },
}

impl DecodeError {
    /// Byte offset at which decoding failed, if the error has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::UnexpectedEndOfInput { offset }
            | DecodeError::MalformedInteger { offset, .. }
            | DecodeError::InvalidLengthPrefix { offset }
            | DecodeError::InvalidDictKey { offset }
            | DecodeError::UnknownValueTag { offset, .. }
            | DecodeError::TrailingData { offset }
            | DecodeError::NestingTooDeep { offset, .. } => Some(*offset),
            DecodeError::EmptyInput => None,
        }
    }
}
