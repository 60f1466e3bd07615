//! Growable in-memory byte store with an independent read cursor.

use crate::{codec, io::at_least, ByteSink, ByteSource, Error, Limits, Read, Write};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

/// Append-only byte sequence with a sequential read cursor and configurable [`Limits`].
///
/// Writes always land at the end; reads start at the cursor and advance it. A `Buffer` is
/// move-only: [`Buffer::try_clone`] is the only way to obtain an independent copy.
///
/// # Examples
///
/// ```
/// use commonware_tlv::Buffer;
///
/// let mut buf = Buffer::new();
/// buf.encode(&(7u32, String::from("hi"))).unwrap();
///
/// let mut value = (0u32, String::new());
/// buf.decode(&mut value).unwrap();
/// assert_eq!(value, (7, "hi".to_string()));
/// assert_eq!(buf.remaining(), 0);
/// ```
#[derive(Debug, Default)]
pub struct Buffer {
    data: BytesMut,
    cursor: usize,
    limits: Limits,
}

impl Buffer {
    /// Creates an empty buffer with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer enforcing `limits`.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            data: BytesMut::new(),
            cursor: 0,
            limits,
        }
    }

    /// Appends `bytes` at the end of the buffer.
    ///
    /// Fails with [`Error::MessageTooLarge`] if the resulting size would exceed
    /// `max_message_bytes`, leaving the buffer unchanged.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if bytes.is_empty() {
            return Ok(());
        }
        let total = self.data.len().saturating_add(bytes.len());
        self.limits.check_message(total)?;
        self.data.put_slice(bytes);
        Ok(())
    }

    /// Copies `n` bytes from the read cursor and advances it.
    ///
    /// Fails with [`Error::Underflow`] if fewer than `n` bytes remain; the cursor does not move.
    pub fn consume_exact(&mut self, n: usize) -> Result<Bytes, Error> {
        at_least(self.remaining(), n)?;
        let end = self.cursor + n;
        let out = Bytes::copy_from_slice(&self.data[self.cursor..end]);
        self.cursor = end;
        Ok(out)
    }

    /// Current read position.
    pub fn tell(&self) -> usize {
        self.cursor
    }

    /// Moves the read cursor to `position`.
    pub fn seek(&mut self, position: usize) -> Result<(), Error> {
        let len = self.data.len();
        if position > len {
            debug!(position, len, "seek out of range");
            return Err(Error::SeekOutOfRange { position, len });
        }
        self.cursor = position;
        Ok(())
    }

    /// Total number of bytes held.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Alias of [`Buffer::size`].
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of bytes between the read cursor and the end.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Drops all bytes and rewinds the cursor.
    pub fn clear(&mut self) {
        self.data.clear();
        self.cursor = 0;
    }

    /// Replaces the configured limits. Bytes already held are not re-checked.
    pub fn set_limits(&mut self, limits: Limits) {
        self.limits = limits;
    }

    /// Configured limits.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// All bytes held, regardless of the cursor.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Bytes not yet read.
    pub fn unread(&self) -> &[u8] {
        &self.data[self.cursor..]
    }

    /// Deep copy of bytes, cursor, and limits.
    ///
    /// Fails with [`Error::MessageTooLarge`] if the held bytes no longer fit the configured
    /// limits (which may have been tightened after they were written).
    pub fn try_clone(&self) -> Result<Self, Error> {
        self.limits.check_message(self.data.len())?;
        Ok(Self {
            data: self.data.clone(),
            cursor: self.cursor,
            limits: self.limits,
        })
    }

    /// Consumes the buffer, returning every byte it held.
    pub fn into_bytes(self) -> Bytes {
        self.data.freeze()
    }

    /// Encodes `value` at the end of the buffer. On failure nothing is appended.
    pub fn encode<T: Write + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        codec::encode(self, value)
    }

    /// Decodes the next value at the read cursor into `value`.
    pub fn decode<T: Read + ?Sized>(&mut self, value: &mut T) -> Result<(), Error> {
        codec::decode(self, value)
    }
}

impl TryFrom<&[u8]> for Buffer {
    type Error = Error;

    /// Copies `bytes` into a new buffer with default limits.
    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        let mut buf = Self::new();
        buf.append(bytes)?;
        Ok(buf)
    }
}

impl ByteSink for Buffer {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.append(bytes)
    }

    fn limits(&self) -> Limits {
        self.limits
    }

    fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.limits
            .check_message(self.data.len().saturating_add(additional))?;
        self.data.reserve(additional);
        Ok(())
    }
}

impl ByteSource for Buffer {
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        at_least(Buffer::remaining(self), dst.len())?;
        let end = self.cursor + dst.len();
        dst.copy_from_slice(&self.data[self.cursor..end]);
        self.cursor = end;
        Ok(())
    }

    fn limits(&self) -> Limits {
        self.limits
    }

    fn remaining(&self) -> Option<usize> {
        Some(Buffer::remaining(self))
    }
}
