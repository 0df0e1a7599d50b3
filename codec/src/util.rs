//! Helpers shared by the type implementations.

use crate::{width, Config, Error};
use bytes::{Buf, BufMut};

/// Checks that at least `len` bytes remain in the buffer.
#[inline]
pub fn at_least<B: Buf>(buf: &B, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::TruncatedInput);
    }
    Ok(())
}

/// Writes a length prefix.
#[inline]
pub fn write_len(len: usize, buf: &mut impl BufMut) {
    width::write_unsigned(len as u64, buf);
}

/// Returns the encoded size of a length prefix.
#[inline]
pub fn len_size(len: usize) -> usize {
    width::size_unsigned(len as u64)
}

/// Reads a length prefix for `len` elements whose encodings occupy at least `min_size` bytes
/// each.
///
/// Fails before anything is allocated if the length exceeds `cfg` or if the remaining input
/// cannot hold that many elements. Elements that may encode to nothing are bounded by `cfg`
/// alone.
pub fn read_len(buf: &mut impl Buf, cfg: &Config, min_size: usize) -> Result<usize, Error> {
    let len = width::read_unsigned(buf, width::Width::W64)?;

    // A length that does not fit in memory cannot be backed by the input either.
    let len = usize::try_from(len).map_err(|_| Error::TruncatedInput)?;
    cfg.check_len(len)?;
    let needed = len.checked_mul(min_size).ok_or(Error::TruncatedInput)?;
    at_least(buf, needed)?;
    Ok(len)
}
