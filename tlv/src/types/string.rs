//! Codec implementations for strings and opaque byte strings.
//!
//! Both travel as `[Bytes][varuint len][len bytes]`. The length is checked against
//! `max_string_bytes` when encoding and, independently, when decoding, before any payload
//! allocation.

use crate::{
    wire::{Category, WireType},
    ByteSink, ByteSource, Error, Read, Reader, Write, Writer,
};
use bytes::Bytes;

fn write_string<S: ByteSink + ?Sized>(w: &mut Writer<'_, S>, bytes: &[u8]) -> Result<(), Error> {
    w.limits().check_string(bytes.len())?;
    w.header(WireType::Bytes)?;
    w.varuint(bytes.len() as u64)?;
    w.put(bytes)
}

fn read_string<S: ByteSource + ?Sized>(r: &mut Reader<'_, S>) -> Result<Vec<u8>, Error> {
    r.expect(Category::String)?;
    let len = r.length()?;
    r.limits().check_string(len)?;
    r.take(len)
}

impl Write for str {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        write_string(w, self.as_bytes())
    }
}

impl Write for String {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        write_string(w, self.as_bytes())
    }
}

impl Read for String {
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        let bytes = read_string(r)?;
        *self = String::from_utf8(bytes).map_err(|_| Error::Invalid("String", "invalid UTF-8"))?;
        Ok(())
    }
}

impl Write for Bytes {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        write_string(w, self)
    }
}

impl Read for Bytes {
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        *self = Bytes::from(read_string(r)?);
        Ok(())
    }
}
