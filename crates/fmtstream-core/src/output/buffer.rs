//! Growable byte buffer used both as the shared output buffer of a format
//! call and as the intermediate buffer a value renders itself into.
//!
//! Design: the buffer is owned by exactly one format call. It is appended to,
//! read back, and then either flushed or discarded; it is never shared across
//! calls or threads.

use std::iter;

use crate::error::{FormatError, Result};

/// Initial capacity reserved for every new buffer.
pub const INLINE_BUFFER_SIZE: usize = 500;

/// Owned, append-only accumulation buffer.
///
/// Invariants:
/// - bytes are only ever appended, never rewritten in place
/// - `len()` is the exact number of bytes appended since creation or the
///   last `clear()`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatBuffer {
    data: Vec<u8>,
}

impl FormatBuffer {
    /// Create an empty buffer with the default inline capacity.
    pub fn new() -> Self {
        Self::with_capacity(INLINE_BUFFER_SIZE)
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Currently reserved capacity.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Append a byte slice.
    pub fn append(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append a single byte.
    pub fn push(&mut self, byte: u8) {
        self.data.push(byte);
    }

    /// Append `count` copies of `byte`.
    ///
    /// Fails without touching the buffer when the allocation cannot grow
    /// by `count` bytes.
    pub fn fill(&mut self, byte: u8, count: usize) -> Result<()> {
        self.reserve(count)?;
        self.data.extend(iter::repeat_n(byte, count));
        Ok(())
    }

    /// Make room for `additional` more bytes up front.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.data
            .try_reserve(additional)
            .map_err(|_| FormatError::Capacity(additional))
    }

    /// Borrow the accumulated bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Discard all content, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Convert to a `String`, replacing invalid UTF-8 sequences.
    ///
    /// Precision truncation works on bytes, so a truncated multi-byte
    /// character can leave a dangling sequence behind.
    pub fn into_string(self) -> String {
        match String::from_utf8(self.data) {
            Ok(s) => s,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }
}

impl AsRef<[u8]> for FormatBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<&str> for FormatBuffer {
    fn from(s: &str) -> Self {
        let mut buf = Self::with_capacity(s.len().max(INLINE_BUFFER_SIZE));
        buf.append(s.as_bytes());
        buf
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
