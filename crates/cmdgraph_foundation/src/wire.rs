//! Wire primitives for the declared command graph.
//!
//! Integers use the client's variable-length encoding: seven bits per byte,
//! least significant group first, high bit set on every byte except the last.
//! Negative values are written as their 32-bit two's complement and always
//! take five bytes.

// VarInt encoding works on the raw bit pattern
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]

use crate::error::{Error, Result};

/// Maximum encoded length of a VarInt.
pub const MAX_VAR_INT_LEN: usize = 5;

const SEGMENT_BITS: u32 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Returns the number of bytes `value` occupies as a VarInt.
#[must_use]
pub fn var_int_len(value: i32) -> usize {
    let mut v = value as u32;
    let mut len = 1;
    while v & !SEGMENT_BITS != 0 {
        v >>= 7;
        len += 1;
    }
    len
}

/// An append-only byte buffer for assembling wire payloads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WireBuffer {
    bytes: Vec<u8>,
}

impl WireBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the written bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the buffer, returning the written bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Writes a big-endian 32-bit integer.
    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a variable-length integer.
    pub fn write_var_int(&mut self, value: i32) {
        let mut v = value as u32;
        loop {
            if v & !SEGMENT_BITS == 0 {
                self.bytes.push(v as u8);
                return;
            }
            self.bytes.push((v & SEGMENT_BITS) as u8 | CONTINUE_BIT);
            v >>= 7;
        }
    }

    /// Writes a length as a VarInt.
    ///
    /// # Errors
    ///
    /// Returns an error if `len` does not fit in an `i32`.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len).map_err(|_| Error::internal("length exceeds i32"))?;
        self.write_var_int(len);
        Ok(())
    }

    /// Writes a VarInt byte length followed by the UTF-8 bytes of `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is longer than `i32::MAX` bytes.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_len(value.len())?;
        self.bytes.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Appends raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}

/// A cursor over wire bytes, the inverse of [`WireBuffer`].
#[derive(Clone, Debug)]
pub struct WireReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Creates a reader positioned at the start of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Reads a single byte.
    ///
    /// # Errors
    ///
    /// Returns an error at end of input.
    pub fn read_u8(&mut self) -> Result<u8> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or_else(|| Error::malformed("unexpected end of input"))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads a big-endian 32-bit integer.
    ///
    /// # Errors
    ///
    /// Returns an error at end of input.
    pub fn read_i32(&mut self) -> Result<i32> {
        let raw = self.read_bytes(4)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(raw);
        Ok(i32::from_be_bytes(buf))
    }

    /// Reads a variable-length integer.
    ///
    /// # Errors
    ///
    /// Returns an error at end of input or if the value runs past five bytes.
    pub fn read_var_int(&mut self) -> Result<i32> {
        let mut value: u32 = 0;
        for i in 0..MAX_VAR_INT_LEN {
            let byte = self.read_u8()?;
            value |= u32::from(byte & SEGMENT_BITS as u8) << (7 * i);
            if byte & CONTINUE_BIT == 0 {
                return Ok(value as i32);
            }
        }
        Err(Error::malformed("VarInt is too big"))
    }

    /// Reads a non-negative VarInt as a length or index.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative.
    pub fn read_len(&mut self) -> Result<usize> {
        let value = self.read_var_int()?;
        usize::try_from(value).map_err(|_| Error::malformed(format!("negative length {value}")))
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error on truncated input or invalid UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_len()?;
        let raw = self.read_bytes(len)?;
        String::from_utf8(raw.to_vec()).map_err(|e| Error::malformed(e.to_string()))
    }

    /// Reads `len` raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::malformed("unexpected end of input"));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}
