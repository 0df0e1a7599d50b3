//! Codec implementations for dynamically sized sequences.
//!
//! A sequence is written as its element count (through the integer codec) followed by each
//! element. On decode the count is checked against [Config] and against the remaining input
//! (`count * T::MIN_SIZE` bytes must be present) before the vector is allocated.

use crate::{
    schema::{Describe, Kind},
    util::{len_size, read_len, write_len},
    width, Config, EncodeSize, Error, Read, Write,
};
use bytes::{Buf, BufMut};
use std::collections::VecDeque;

// Slice implementation (encode only)
impl<T: Write> Write for [T] {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_len(self.len(), buf);
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for [T] {
    #[inline]
    fn encode_size(&self) -> usize {
        len_size(self.len()) + self.iter().map(EncodeSize::encode_size).sum::<usize>()
    }
}

impl<T: Describe> Describe for [T] {
    const KIND: Kind = Kind::Sequence { element: &T::KIND };
}

// Vec implementation
impl<T: Write> Write for Vec<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        self.as_slice().write(buf);
    }
}

impl<T: EncodeSize> EncodeSize for Vec<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        self.as_slice().encode_size()
    }
}

impl<T: Read> Read for Vec<T> {
    const MIN_SIZE: usize = width::MIN_SIZE;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        let len = read_len(buf, cfg, T::MIN_SIZE)?;
        // A zero minimum size leaves `len` unbacked by input, so grow as elements arrive.
        let capacity = if T::MIN_SIZE == 0 { 0 } else { len };
        let mut vec = Vec::with_capacity(capacity);
        for _ in 0..len {
            vec.push(T::read_cfg(buf, cfg)?);
        }
        Ok(vec)
    }
}

impl<T: Describe> Describe for Vec<T> {
    const KIND: Kind = Kind::Sequence { element: &T::KIND };
}

// VecDeque implementation
impl<T: Write> Write for VecDeque<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_len(self.len(), buf);
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for VecDeque<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        len_size(self.len()) + self.iter().map(EncodeSize::encode_size).sum::<usize>()
    }
}

impl<T: Read> Read for VecDeque<T> {
    const MIN_SIZE: usize = width::MIN_SIZE;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        Vec::<T>::read_cfg(buf, cfg).map(VecDeque::from)
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    const KIND: Kind = Kind::Sequence { element: &T::KIND };
}
