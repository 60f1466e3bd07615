//! Capability contracts for the storage behind an encoded stream.
//!
//! The codec never touches bytes directly: everything funnels through [`ByteSink`] (append a
//! run of bytes) and [`ByteSource`] (read an exact run of bytes). [`crate::Buffer`] is the
//! canonical implementation of both; plain vectors and slices are supported for convenience.

use crate::{Error, Limits};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Destination of encoded bytes.
pub trait ByteSink {
    /// Appends `bytes` in full, or fails without appending anything.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error>;

    /// Limits applied when encoding into this sink.
    fn limits(&self) -> Limits {
        Limits::default()
    }

    /// Fails if `additional` more bytes could not be accepted.
    ///
    /// Called with the exact encoded size before a top-level value is written, so sinks with
    /// a size bound can reject the value before any of it is visible.
    fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        let _ = additional;
        Ok(())
    }

    /// Number of bytes counted so far, if this sink only counts.
    fn counted(&self) -> Option<usize> {
        None
    }
}

/// Origin of encoded bytes.
pub trait ByteSource {
    /// Fills `dst` completely, or fails with [`Error::Underflow`] without consuming anything.
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error>;

    /// Limits applied when decoding from this source.
    fn limits(&self) -> Limits {
        Limits::default()
    }

    /// Number of readable bytes, if known.
    fn remaining(&self) -> Option<usize> {
        None
    }
}

/// Bidirectional access to a byte store.
pub trait ByteIO: ByteSink + ByteSource {}

impl<T: ByteSink + ByteSource + ?Sized> ByteIO for T {}

impl ByteSink for Vec<u8> {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl ByteSink for BytesMut {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.put_slice(bytes);
        Ok(())
    }
}

/// Checks that `remaining` bytes can satisfy a read of `requested` bytes.
#[inline]
pub(crate) fn at_least(remaining: usize, requested: usize) -> Result<(), Error> {
    if requested > remaining {
        return Err(Error::Underflow {
            requested,
            remaining,
        });
    }
    Ok(())
}

impl<'a> ByteSource for &'a [u8] {
    #[inline]
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        at_least(self.len(), dst.len())?;
        let slice: &'a [u8] = *self;
        let (head, tail) = slice.split_at(dst.len());
        dst.copy_from_slice(head);
        *self = tail;
        Ok(())
    }

    #[inline]
    fn remaining(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl ByteSource for Bytes {
    #[inline]
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        at_least(Buf::remaining(self), dst.len())?;
        self.copy_to_slice(dst);
        Ok(())
    }

    #[inline]
    fn remaining(&self) -> Option<usize> {
        Some(Buf::remaining(self))
    }
}
