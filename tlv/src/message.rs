//! Typed envelope pairing a message kind with an encoded payload.

use crate::{Buffer, Error, Limits, Read, Write};

/// A message kind plus the [`Buffer`] holding its payload.
///
/// Values are appended with [`Message::push`] and read back, in the same order, with
/// [`Message::pop`]. The kind is fixed at construction. Like [`Buffer`], a `Message` can
/// only be moved.
///
/// # Examples
///
/// ```
/// use commonware_tlv::Message;
///
/// let mut msg = Message::new(7);
/// msg.push(&42u32)?.push("hello")?;
///
/// let (mut number, mut text) = (0u32, String::new());
/// msg.pop(&mut number)?.pop(&mut text)?;
/// assert_eq!((number, text.as_str()), (42, "hello"));
/// assert_eq!(msg.kind(), 7);
/// # Ok::<(), commonware_tlv::Error>(())
/// ```
#[derive(Debug)]
pub struct Message {
    kind: i32,
    buffer: Buffer,
}

impl Message {
    /// Creates an empty message of `kind` with default limits.
    pub fn new(kind: i32) -> Self {
        Self {
            kind,
            buffer: Buffer::new(),
        }
    }

    /// Creates an empty message of `kind` enforcing `limits`.
    pub fn with_limits(kind: i32, limits: Limits) -> Self {
        Self {
            kind,
            buffer: Buffer::with_limits(limits),
        }
    }

    /// Reassembles a message from a kind and a payload buffer.
    pub fn from_parts(kind: i32, buffer: Buffer) -> Self {
        Self { kind, buffer }
    }

    /// The message kind.
    pub fn kind(&self) -> i32 {
        self.kind
    }

    /// Appends `value` to the payload.
    pub fn push<T: Write + ?Sized>(&mut self, value: &T) -> Result<&mut Self, Error> {
        self.buffer.encode(value)?;
        Ok(self)
    }

    /// Reads the next payload value into `value`.
    pub fn pop<T: Read + ?Sized>(&mut self, value: &mut T) -> Result<&mut Self, Error> {
        self.buffer.decode(value)?;
        Ok(self)
    }

    /// The payload.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Splits the message into its kind and payload.
    pub fn into_parts(self) -> (i32, Buffer) {
        (self.kind, self.buffer)
    }
}
