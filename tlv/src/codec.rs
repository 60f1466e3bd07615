//! Core codec traits and the cursors they run over.
//!
//! Every value is encoded as `[header][payload]`. Scalars write their payload directly;
//! compound values (containers and aggregates) write `[Bytes header][varuint len][payload]`,
//! where `len` is learned by first driving the same payload encoder over a [`Sizer`].

use crate::{
    io::at_least,
    varint,
    wire::{self, Category, WireType},
    ByteSink, ByteSource, Error, Limits, Sizer,
};
use bytes::{Bytes, BytesMut};

/// Encoding cursor over a [`ByteSink`].
///
/// Carries the effective [`Limits`] and the current nesting depth. A `Writer` is itself a
/// [`ByteSink`], so the scalar codecs can run over it directly.
pub struct Writer<'a, S: ByteSink + ?Sized> {
    sink: &'a mut S,
    limits: Limits,
    depth: usize,
}

impl<'a, S: ByteSink + ?Sized> Writer<'a, S> {
    /// Creates a writer enforcing the sink's own limits.
    pub fn new(sink: &'a mut S) -> Self {
        let limits = sink.limits();
        Self::with_limits(sink, limits)
    }

    /// Creates a writer enforcing `limits`.
    pub fn with_limits(sink: &'a mut S, limits: Limits) -> Self {
        Self {
            sink,
            limits,
            depth: 0,
        }
    }

    /// Limits in effect.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Number of compound values currently entered.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Writes a header byte.
    #[inline]
    pub fn header(&mut self, wire_type: WireType) -> Result<(), Error> {
        wire::write_header(&mut *self.sink, wire_type)
    }

    /// Writes an unsigned varint (without a header).
    #[inline]
    pub fn varuint(&mut self, value: u64) -> Result<(), Error> {
        varint::write(&mut *self.sink, value)
    }

    /// Writes raw bytes (without a header).
    #[inline]
    pub fn put(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.sink.write_bytes(bytes)
    }

    /// Writes one complete value.
    #[inline]
    pub fn value<T: Write + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        value.write(self)
    }

    /// Runs `f` against a counting writer at the same depth and returns the bytes it wrote.
    pub fn measure<F>(&self, f: F) -> Result<usize, Error>
    where
        F: FnOnce(&mut Writer<'_, Sizer>) -> Result<(), Error>,
    {
        let mut sizer = Sizer::with_limits(self.limits);
        let mut counter = Writer {
            sink: &mut sizer,
            limits: self.limits,
            depth: self.depth,
        };
        f(&mut counter)?;
        Ok(sizer.count())
    }

    /// Writes a length-prefixed compound value one level deeper.
    pub(crate) fn compound<P: Payload + ?Sized>(&mut self, payload: &P) -> Result<(), Error> {
        let depth = self.depth + 1;
        self.limits.check_depth(depth)?;
        self.depth = depth;
        let result = self.framed(payload);
        self.depth = depth - 1;
        result
    }

    fn framed<P: Payload + ?Sized>(&mut self, payload: &P) -> Result<(), Error> {
        // Counting only: the payload size is the count delta, so nested compounds are
        // traversed once instead of once per enclosing level.
        if let Some(start) = self.sink.counted() {
            payload.write_payload(self)?;
            let end = self.sink.counted().unwrap_or(start);
            self.header(WireType::Bytes)?;
            return self.varuint(end.saturating_sub(start) as u64);
        }

        let len = self.measure(|counter| payload.write_payload(counter))?;
        self.header(WireType::Bytes)?;
        self.varuint(len as u64)?;
        payload.write_payload(self)
    }
}

impl<S: ByteSink + ?Sized> ByteSink for Writer<'_, S> {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.sink.write_bytes(bytes)
    }

    fn limits(&self) -> Limits {
        self.limits
    }

    fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.sink.reserve(additional)
    }

    #[inline]
    fn counted(&self) -> Option<usize> {
        self.sink.counted()
    }
}

/// Decoding cursor over a [`ByteSource`].
///
/// Tracks the bytes consumed so that a compound payload can be bounded by its length prefix:
/// inside [`Reader::frame`], reads past the prefix fail with [`Error::Underflow`].
pub struct Reader<'a, S: ByteSource + ?Sized> {
    source: &'a mut S,
    limits: Limits,
    depth: usize,
    consumed: usize,
    frame_end: Option<usize>,
}

impl<'a, S: ByteSource + ?Sized> Reader<'a, S> {
    /// Creates a reader enforcing the source's own limits.
    pub fn new(source: &'a mut S) -> Self {
        let limits = source.limits();
        Self::with_limits(source, limits)
    }

    /// Creates a reader enforcing `limits`.
    pub fn with_limits(source: &'a mut S, limits: Limits) -> Self {
        Self {
            source,
            limits,
            depth: 0,
            consumed: 0,
            frame_end: None,
        }
    }

    /// Limits in effect.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Number of compound values currently entered.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Reads a header byte.
    #[inline]
    pub fn header(&mut self) -> Result<WireType, Error> {
        wire::read_header(self)
    }

    /// Reads a header byte and checks it fits `category`.
    pub fn expect(&mut self, category: Category) -> Result<(), Error> {
        let found = self.header()?;
        if found != category.wire_type() {
            return Err(Error::TypeMismatch {
                found,
                expected: category,
            });
        }
        Ok(())
    }

    /// Reads one complete value into `value`.
    #[inline]
    pub fn value<T: Read + ?Sized>(&mut self, value: &mut T) -> Result<(), Error> {
        value.read_into(self)
    }

    /// Reads an unsigned varint (without a header).
    #[inline]
    pub fn varuint(&mut self) -> Result<u64, Error> {
        varint::read(self)
    }

    /// Reads a varint length prefix.
    ///
    /// Lengths that do not fit a `usize` saturate, so they fail the subsequent limit checks.
    pub fn length(&mut self) -> Result<usize, Error> {
        let len = self.varuint()?;
        Ok(usize::try_from(len).unwrap_or(usize::MAX))
    }

    /// Reads a container element count, checked against `max_elements`.
    pub fn count(&mut self) -> Result<usize, Error> {
        let count = self.length()?;
        self.limits.check_elements(count)?;
        Ok(count)
    }

    /// Reads exactly `len` raw bytes.
    ///
    /// Fails before allocating if fewer than `len` bytes are known to remain.
    pub fn take(&mut self, len: usize) -> Result<Vec<u8>, Error> {
        if let Some(remaining) = ByteSource::remaining(self) {
            at_least(remaining, len)?;
        }
        let mut bytes = vec![0u8; len];
        self.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    /// Upper bound for pre-allocating `count` decoded elements.
    pub(crate) fn capacity(&self, count: usize) -> usize {
        count.min(ByteSource::remaining(self).unwrap_or(0))
    }

    /// Reads a length prefix and runs `f` over exactly that many bytes, one level deeper.
    ///
    /// Fails with [`Error::NestingTooDeep`] before running `f` if the depth limit would be
    /// exceeded, and with [`Error::ExtraData`] if `f` leaves part of the payload unread.
    pub fn frame<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let len = self.length()?;
        let depth = self.depth + 1;
        self.limits.check_depth(depth)?;
        if let Some(remaining) = ByteSource::remaining(self) {
            at_least(remaining, len)?;
        }
        let end = self.consumed.saturating_add(len);

        let outer = self.frame_end.replace(end);
        self.depth = depth;
        let result = f(self);
        self.depth = depth - 1;
        self.frame_end = outer;

        let value = result?;
        if self.consumed != end {
            return Err(Error::ExtraData(end - self.consumed));
        }
        Ok(value)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Reader<'_, S> {
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        if let Some(end) = self.frame_end {
            at_least(end - self.consumed, dst.len())?;
        }
        self.source.read_exact(dst)?;
        self.consumed += dst.len();
        Ok(())
    }

    fn limits(&self) -> Limits {
        self.limits
    }

    fn remaining(&self) -> Option<usize> {
        match self.frame_end {
            Some(end) => Some(end - self.consumed),
            None => self.source.remaining(),
        }
    }
}

/// Trait for types that can be written (encoded) as one `[header][payload]` value.
pub trait Write {
    /// Encodes this value.
    ///
    /// Must be deterministic: the counting pass and the real pass see the same bytes.
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error>;
}

/// Trait for types that can be read (decoded) in place.
pub trait Read {
    /// Decodes one value into `self`.
    ///
    /// Dynamic containers and strings replace their contents only once the whole value has
    /// been decoded. Fixed-size arrays and aggregates are filled slot by slot.
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error>;
}

/// Extension trait returning freshly decoded values.
pub trait ReadExt: Read + Default {
    /// Decodes one value into a new [`Default`] instance.
    fn read<S: ByteSource + ?Sized>(r: &mut Reader<'_, S>) -> Result<Self, Error> {
        let mut value = Self::default();
        value.read_into(r)?;
        Ok(value)
    }
}

impl<T: Read + Default> ReadExt for T {}

/// Extension hook for user-defined types.
///
/// Implementors list their fields in order; the framing (`Bytes` header and length prefix),
/// the depth accounting, and the payload bounds are applied by the blanket [`Write`] and
/// [`Read`] impls. Decoding is positional: `read_fields` must read exactly the sequence of
/// values `write_fields` wrote.
///
/// # Examples
///
/// ```
/// use commonware_tlv::{Aggregate, ByteSink, ByteSource, Decode, Encode, Error, Reader, Writer};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
///     label: String,
/// }
///
/// impl Aggregate for Point {
///     fn write_fields<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
///         w.value(&self.x)?;
///         w.value(&self.y)?;
///         w.value(&self.label)
///     }
///
///     fn read_fields<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
///         r.value(&mut self.x)?;
///         r.value(&mut self.y)?;
///         r.value(&mut self.label)
///     }
/// }
///
/// let point = Point { x: 1, y: -1, label: "origin".into() };
/// let encoded = point.encode().unwrap();
/// assert_eq!(Point::decode(&encoded).unwrap(), point);
/// ```
pub trait Aggregate {
    /// Writes every field, in order.
    fn write_fields<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error>;

    /// Reads every field, in the order `write_fields` wrote them.
    fn read_fields<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>)
        -> Result<(), Error>;
}

impl<T: Aggregate + ?Sized> Write for T {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        w.compound(&Fields(self))
    }
}

impl<T: Aggregate + ?Sized> Read for T {
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        r.expect(Category::Aggregate)?;
        r.frame(|r| self.read_fields(r))
    }
}

/// Body of a length-prefixed compound value.
pub(crate) trait Payload {
    fn write_payload<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error>;
}

struct Fields<'a, T: ?Sized>(&'a T);

impl<T: Aggregate + ?Sized> Payload for Fields<'_, T> {
    #[inline]
    fn write_payload<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        self.0.write_fields(w)
    }
}

/// Container payload: `[varuint count][elements...]`.
pub(crate) struct Elements<I>(pub I);

impl<I> Payload for Elements<I>
where
    I: ExactSizeIterator + Clone,
    I::Item: Element,
{
    fn write_payload<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        let items = self.0.clone();
        w.varuint(items.len() as u64)?;
        for item in items {
            item.write_element(w)?;
        }
        Ok(())
    }
}

/// One container element as yielded by the container's iterator.
pub(crate) trait Element {
    fn write_element<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error>;
}

impl<T: Write + ?Sized> Element for &T {
    #[inline]
    fn write_element<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        (**self).write(w)
    }
}

// Map entries are written as the key followed by the value.
impl<K: Write, V: Write> Element for (&K, &V) {
    #[inline]
    fn write_element<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        self.0.write(w)?;
        self.1.write(w)
    }
}

/// Returns the number of bytes `value` encodes to under `limits`.
///
/// Fails with the same error a real encode would (string length, nesting depth), except for
/// the total size check, which only a concrete sink can apply.
pub fn encoded_len<T: Write + ?Sized>(value: &T, limits: Limits) -> Result<usize, Error> {
    let mut sizer = Sizer::with_limits(limits);
    value.write(&mut Writer::new(&mut sizer))?;
    Ok(sizer.count())
}

/// Encodes `value` into `sink`.
///
/// The encoded size is computed and reserved on the sink before the first byte is written,
/// so a failed encode leaves a [`crate::Buffer`] unchanged.
pub fn encode<S, T>(sink: &mut S, value: &T) -> Result<(), Error>
where
    S: ByteSink + ?Sized,
    T: Write + ?Sized,
{
    let len = encoded_len(value, sink.limits())?;
    sink.reserve(len)?;
    value.write(&mut Writer::new(sink))
}

/// Decodes the next value in `source` into `value`.
pub fn decode<S, T>(source: &mut S, value: &mut T) -> Result<(), Error>
where
    S: ByteSource + ?Sized,
    T: Read + ?Sized,
{
    value.read_into(&mut Reader::new(source))
}

/// Convenience encoding into freshly allocated bytes.
pub trait Encode: Write {
    /// Encodes this value with default [`Limits`], including `max_message_bytes`.
    fn encode(&self) -> Result<Bytes, Error> {
        let len = self.encode_size()?;
        let mut buf = BytesMut::with_capacity(len);
        self.write(&mut Writer::new(&mut buf))?;
        Ok(buf.freeze())
    }

    /// Number of bytes [`Encode::encode`] would produce.
    ///
    /// Fails like [`Encode::encode`] when the value exceeds the default [`Limits`].
    fn encode_size(&self) -> Result<usize, Error> {
        let limits = Limits::default();
        let len = encoded_len(self, limits)?;
        limits.check_message(len)?;
        Ok(len)
    }
}

impl<T: Write + ?Sized> Encode for T {}

/// Convenience decoding of a complete input.
pub trait Decode: Read + Default {
    /// Decodes a value with default [`Limits`], ensuring `bytes` is fully consumed.
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Self::decode_with(bytes, Limits::default())
    }

    /// Decodes a value with `limits`, ensuring `bytes` is fully consumed.
    fn decode_with(mut bytes: &[u8], limits: Limits) -> Result<Self, Error> {
        limits.check_message(bytes.len())?;
        let mut value = Self::default();
        value.read_into(&mut Reader::with_limits(&mut bytes, limits))?;
        if !bytes.is_empty() {
            return Err(Error::ExtraData(bytes.len()));
        }
        Ok(value)
    }
}

impl<T: Read + Default> Decode for T {}
