use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How byte strings that are not safe text get written out.
///
/// ```
/// use datdump::escape::Scheme;
///
/// let scheme: Scheme = "hex".parse().unwrap();
/// assert_eq!(scheme.escape(b"\x01\xff"), "01ff");
/// assert_eq!(Scheme::default(), Scheme::Base64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    /// Two lowercase hex digits per byte.
    Hex,
    /// Standard base64 alphabet with padding, no line breaks.
    #[default]
    Base64,
    /// One Latin-1 character per byte, control characters included.
    Raw,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Hex, Scheme::Base64, Scheme::Raw];

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Hex => "hex",
            Scheme::Base64 => "base64",
            Scheme::Raw => "raw",
        }
    }

    /// Tag appended (after `$`) to a dictionary key whose value was escaped.
    ///
    /// `Raw` has none: its output is a reinterpretation, not a re-encoding.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Scheme::Raw => None,
            other => Some(other.name()),
        }
    }

    pub fn escape(self, bytes: &[u8]) -> String {
        match self {
            Scheme::Hex => hex::encode(bytes),
            Scheme::Base64 => STANDARD.encode(bytes),
            Scheme::Raw => bytes.iter().copied().map(char::from).collect(),
        }
    }

    /// Reverses [`Scheme::escape`]. Returns `None` if `text` could not have
    /// been produced by this scheme.
    ///
    /// ```
    /// use datdump::escape::Scheme;
    ///
    /// for scheme in Scheme::ALL {
    ///     let text = scheme.escape(b"\x00\x9c\xe9");
    ///     assert_eq!(scheme.unescape(&text).as_deref(), Some(&b"\x00\x9c\xe9"[..]));
    /// }
    /// ```
    pub fn unescape(self, text: &str) -> Option<Vec<u8>> {
        match self {
            Scheme::Hex => hex::decode(text).ok(),
            Scheme::Base64 => STANDARD.decode(text).ok(),
            Scheme::Raw => text.chars().map(|c| u8::try_from(c).ok()).collect(),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown escaping scheme {0:?} (expected hex, base64 or raw)")]
pub struct SchemeParseError(String);

impl FromStr for Scheme {
    type Err = SchemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SchemeParseError(s.to_owned()))
    }
}
