//! Encode structured data as self-delimiting wire-type + length + value records.
//!
//! # Overview
//!
//! A positional binary codec designed to efficiently and safely:
//! - Serialize structured data without an external schema compiler
//! - Deserialize untrusted binary input under configurable [`Limits`]
//!
//! Every value is a one-byte header naming one of five wire types, followed by its payload:
//!
//! | Wire type | Code | Payload |
//! |---|---|---|
//! | `VarUInt` | 0 | base-128 varint |
//! | `VarSIntZigZag` | 1 | base-128 varint of the zigzag-mapped value |
//! | `Bytes` | 2 | `[varuint len][len bytes]` |
//! | `Fixed32` | 3 | 4 little-endian bytes |
//! | `Fixed64` | 4 | 8 little-endian bytes |
//!
//! The shape of a `Bytes` payload (raw byte, string, container, aggregate) is implied by the
//! type being decoded; the format carries no field identity, so values must be read back in
//! exactly the order and shape they were written.
//!
//! # Supported Types
//!
//! Natively supports:
//! - Raw bytes: `u8`
//! - Integers: `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64`, `bool`, and enumerations
//!   through [`impl_enumeration`]
//! - Floats: `f32`, `f64`
//! - Strings: `String`, `str`, [`bytes::Bytes`]
//! - Containers: `Vec<T>`, `[T]`, `[T; N]`, `VecDeque<T>`, `BTreeSet<T>`, `BTreeMap<K, V>`
//! - Aggregates: tuples, and user-defined types implementing [`Aggregate`]
//!
//! # Example
//!
//! ```
//! use commonware_tlv::{Aggregate, Buffer, ByteSink, ByteSource, Error, Reader, Writer};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Item {
//!     id: u64,
//!     tags: Vec<String>,
//!     weight: f32,
//! }
//!
//! impl Aggregate for Item {
//!     fn write_fields<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
//!         w.value(&self.id)?;
//!         w.value(&self.tags)?;
//!         w.value(&self.weight)
//!     }
//!
//!     fn read_fields<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
//!         r.value(&mut self.id)?;
//!         r.value(&mut self.tags)?;
//!         r.value(&mut self.weight)
//!     }
//! }
//!
//! let item = Item { id: 7, tags: vec!["a".into(), "b".into()], weight: 0.5 };
//!
//! let mut buf = Buffer::new();
//! buf.encode(&item)?;
//! buf.encode(&-1i32)?;
//!
//! let mut decoded = Item::default();
//! let mut trailer = 0i32;
//! buf.decode(&mut decoded)?;
//! buf.decode(&mut trailer)?;
//! assert_eq!(decoded, item);
//! assert_eq!(trailer, -1);
//! # Ok::<(), Error>(())
//! ```

pub mod buffer;
pub mod codec;
pub mod error;
pub mod fixed;
pub mod io;
pub mod limits;
pub mod message;
pub mod sizer;
pub mod types;
pub mod varint;
pub mod wire;

// Re-export main types and traits
pub use buffer::Buffer;
pub use codec::{
    decode, encode, encoded_len, Aggregate, Decode, Encode, Read, ReadExt, Reader, Write, Writer,
};
pub use error::Error;
pub use io::{ByteIO, ByteSink, ByteSource};
pub use limits::Limits;
pub use message::Message;
pub use sizer::Sizer;
pub use types::primitives::{
    read_enumeration, read_integer, write_enumeration, write_integer, Enumeration, Integer,
};
pub use wire::{Category, WireType};
