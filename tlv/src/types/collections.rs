//! Codec implementations for containers.
//!
//! A container is `[Bytes][varuint len][varuint count][elements...]`, elements in iteration
//! order. Map entries are written as the key followed by the value. Only containers with a
//! deterministic iteration order are supported, so the counting pass and the writing pass
//! always agree.

use crate::{
    codec::Elements, wire::Category, ByteSink, ByteSource, Error, Read, ReadExt, Reader, Write,
    Writer,
};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Reads a dynamic container into a new vector.
fn read_elements<T, S>(r: &mut Reader<'_, S>) -> Result<Vec<T>, Error>
where
    T: Read + Default,
    S: ByteSource + ?Sized,
{
    r.expect(Category::Container)?;
    r.frame(|r| {
        let count = r.count()?;
        let mut items = Vec::with_capacity(r.capacity(count));
        for _ in 0..count {
            items.push(T::read(r)?);
        }
        Ok(items)
    })
}

// Slice implementation
impl<T: Write> Write for [T] {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        w.compound(&Elements(self.iter()))
    }
}

impl<T: Read> Read for [T] {
    /// Decodes slot by slot; the encoded count must equal the slice length.
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        r.expect(Category::Container)?;
        r.frame(|r| {
            let count = r.count()?;
            if count != self.len() {
                return Err(Error::ElementCountMismatch {
                    found: count,
                    expected: self.len(),
                });
            }
            for slot in self.iter_mut() {
                slot.read_into(r)?;
            }
            Ok(())
        })
    }
}

// Constant-size array implementation
impl<T: Write, const N: usize> Write for [T; N] {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        self.as_slice().write(w)
    }
}

impl<T: Read, const N: usize> Read for [T; N] {
    #[inline]
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        self.as_mut_slice().read_into(r)
    }
}

// Vec implementation
impl<T: Write> Write for Vec<T> {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        self.as_slice().write(w)
    }
}

impl<T: Read + Default> Read for Vec<T> {
    #[inline]
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        *self = read_elements(r)?;
        Ok(())
    }
}

// VecDeque implementation
impl<T: Write> Write for VecDeque<T> {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        w.compound(&Elements(self.iter()))
    }
}

impl<T: Read + Default> Read for VecDeque<T> {
    #[inline]
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        *self = read_elements::<T, S>(r)?.into();
        Ok(())
    }
}

// BTreeSet implementation
impl<T: Write> Write for BTreeSet<T> {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        w.compound(&Elements(self.iter()))
    }
}

impl<T: Read + Default + Ord> Read for BTreeSet<T> {
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        let mut set = BTreeSet::new();
        for item in read_elements::<T, S>(r)? {
            if !set.insert(item) {
                return Err(Error::Invalid("BTreeSet", "duplicate element"));
            }
        }
        *self = set;
        Ok(())
    }
}

// BTreeMap implementation
impl<K: Write, V: Write> Write for BTreeMap<K, V> {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        w.compound(&Elements(self.iter()))
    }
}

impl<K, V> Read for BTreeMap<K, V>
where
    K: Read + Default + Ord,
    V: Read + Default,
{
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        r.expect(Category::Container)?;
        *self = r.frame(|r| {
            let count = r.count()?;
            let mut map = BTreeMap::new();
            for _ in 0..count {
                let key = K::read(r)?;
                let value = V::read(r)?;
                if map.insert(key, value).is_some() {
                    return Err(Error::Invalid("BTreeMap", "duplicate key"));
                }
            }
            Ok(map)
        })?;
        Ok(())
    }
}
