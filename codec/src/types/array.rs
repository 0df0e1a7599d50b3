//! Codec implementations for fixed-size arrays.
//!
//! The length is part of the type, so no prefix is written: an `[T; N]` is exactly its `N`
//! elements, each through its own codec.

use crate::{
    schema::{Describe, Kind},
    util::at_least,
    Config, EncodeSize, Error, Read, Write,
};
use bytes::{Buf, BufMut};

impl<T: Write, const N: usize> Write for [T; N] {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize, const N: usize> EncodeSize for [T; N] {
    #[inline]
    fn encode_size(&self) -> usize {
        self.iter().map(EncodeSize::encode_size).sum()
    }
}

impl<T: Read, const N: usize> Read for [T; N] {
    const MIN_SIZE: usize = N * T::MIN_SIZE;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        at_least(buf, Self::MIN_SIZE)?;
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::read_cfg(buf, cfg)?);
        }

        // Exactly `N` items were read above.
        items.try_into().map_err(|_| Error::TruncatedInput)
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    const KIND: Kind = Kind::Array {
        len: N,
        element: &T::KIND,
    };
}
