use super::error::DecodeError;

/// Forward-only reader over an in-memory byte buffer.
///
/// The cursor never rewinds. Once [`Cursor::is_exhausted`] reports `true`
/// every further [`Cursor::next_byte`] fails with
/// [`DecodeError::UnexpectedEndOfInput`].
#[derive(Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the next byte and advances past it.
    pub fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self
            .peek()
            .ok_or(DecodeError::UnexpectedEndOfInput { offset: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Returns the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Consumes exactly `len` bytes.
    ///
    /// On failure the cursor is left at the end of the input, as if the
    /// available bytes had been read one at a time.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if len > remaining {
            self.pos = self.data.len();
            return Err(DecodeError::UnexpectedEndOfInput { offset: self.pos });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.data[start..self.pos])
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}
