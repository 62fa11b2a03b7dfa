use super::cursor::Cursor;
use super::error::DecodeError;
use super::value::Value;
use bytes::Bytes;
use num_bigint::BigInt;
use std::collections::BTreeMap;

/// Default and highest accepted limit on list/dictionary nesting.
pub const MAX_DEPTH: usize = 256;

/// Knobs for a single decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Ignore bytes that follow the top-level value instead of failing.
    pub allow_trailing: bool,
    /// Deepest list/dictionary nesting accepted before failing, capped at
    /// [`MAX_DEPTH`] since every level is a stack frame.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            allow_trailing: false,
            max_depth: MAX_DEPTH,
        }
    }
}

/// Decodes exactly one bencode value from `data`.
///
/// Bytes left over after the value are rejected with
/// [`DecodeError::TrailingData`]; use [`decode_prefix`] to tolerate them.
///
/// # Examples
///
/// ```
/// use datdump::bencode::{decode, Value};
///
/// let value = decode(b"l4:spam4:eggse").unwrap();
/// assert_eq!(value, Value::List(vec!["spam".into(), "eggs".into()]));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    decode_with(data, &DecodeOptions::default())
}

/// Decodes the first value in `data` and returns it with the number of
/// bytes it occupied. Anything after it is left untouched.
///
/// ```
/// use datdump::bencode::decode_prefix;
///
/// let (value, used) = decode_prefix(b"i7e junk").unwrap();
/// assert_eq!(value.as_i64(), Some(7));
/// assert_eq!(used, 3);
/// ```
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize), DecodeError> {
    let options = DecodeOptions {
        allow_trailing: true,
        ..DecodeOptions::default()
    };
    decode_top_level(data, &options)
}

pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Value, DecodeError> {
    decode_top_level(data, options).map(|(value, _)| value)
}

fn decode_top_level(
    data: &[u8],
    options: &DecodeOptions,
) -> Result<(Value, usize), DecodeError> {
    let mut decoder = Decoder {
        cursor: Cursor::new(data),
        max_depth: options.max_depth.min(MAX_DEPTH),
    };

    if decoder.cursor.is_exhausted() {
        return Err(DecodeError::EmptyInput);
    }

    let value = decoder.decode_value(0)?;
    let consumed = decoder.cursor.position();

    if !decoder.cursor.is_exhausted() {
        if !options.allow_trailing {
            return Err(DecodeError::TrailingData { offset: consumed });
        }
        tracing::debug!(
            consumed,
            trailing = decoder.cursor.remaining(),
            "ignoring trailing data after value"
        );
    }

    tracing::debug!(consumed, "decoded bencode value");
    Ok((value, consumed))
}

struct Decoder<'a> {
    cursor: Cursor<'a>,
    max_depth: usize,
}

impl Decoder<'_> {
    fn decode_value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let offset = self.cursor.position();
        if depth > self.max_depth {
            return Err(DecodeError::NestingTooDeep {
                offset,
                max_depth: self.max_depth,
            });
        }

        match self.cursor.next_byte()? {
            b'i' => self.decode_integer(),
            b'l' => self.decode_list(depth),
            b'd' => self.decode_dict(depth),
            first @ b'0'..=b'9' => self.decode_bytes(first, offset),
            // Lengths are unsigned; only integers may carry a sign.
            b'-' => Err(DecodeError::InvalidLengthPrefix { offset }),
            tag => Err(DecodeError::UnknownValueTag { offset, tag }),
        }
    }

    fn decode_integer(&mut self) -> Result<Value, DecodeError> {
        let start = self.cursor.position();
        let mut digits = String::new();

        loop {
            let offset = self.cursor.position();
            match self.cursor.next_byte()? {
                b'e' => break,
                b'-' if digits.is_empty() => digits.push('-'),
                c if c.is_ascii_digit() => digits.push(c as char),
                c => {
                    return Err(DecodeError::MalformedInteger {
                        offset,
                        reason: format!("unexpected byte {c:#04x}"),
                    })
                }
            }
        }

        if digits.is_empty() || digits == "-" {
            return Err(DecodeError::MalformedInteger {
                offset: start,
                reason: "no digits".into(),
            });
        }

        let value: BigInt = digits.parse().map_err(|_| DecodeError::MalformedInteger {
            offset: start,
            reason: digits.clone(),
        })?;

        Ok(Value::Integer(value))
    }

    fn decode_bytes(&mut self, first: u8, offset: usize) -> Result<Value, DecodeError> {
        let mut len = usize::from(first - b'0');

        loop {
            match self.cursor.next_byte()? {
                b':' => break,
                c if c.is_ascii_digit() => {
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(c - b'0')))
                        .ok_or(DecodeError::InvalidLengthPrefix { offset })?;
                }
                _ => return Err(DecodeError::InvalidLengthPrefix { offset }),
            }
        }

        let payload = self.cursor.take(len)?;
        Ok(Value::Bytes(Bytes::copy_from_slice(payload)))
    }

    fn decode_list(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let mut list = Vec::new();

        while !self.at_terminator()? {
            list.push(self.decode_value(depth + 1)?);
        }

        Ok(Value::List(list))
    }

    fn decode_dict(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let mut dict = BTreeMap::new();

        while !self.at_terminator()? {
            let offset = self.cursor.position();
            let key = match self.decode_value(depth + 1)? {
                Value::Bytes(b) => b,
                _ => return Err(DecodeError::InvalidDictKey { offset }),
            };

            let value = self.decode_value(depth + 1)?;
            if dict.insert(key, value).is_some() {
                tracing::trace!(offset, "duplicate dictionary key, keeping the last value");
            }
        }

        Ok(Value::Dict(dict))
    }

    /// Consumes the `e` that closes a list or dictionary, if it is next.
    fn at_terminator(&mut self) -> Result<bool, DecodeError> {
        match self.cursor.peek() {
            Some(b'e') => {
                self.cursor.next_byte()?;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(DecodeError::UnexpectedEndOfInput {
                offset: self.cursor.position(),
            }),
        }
    }
}
