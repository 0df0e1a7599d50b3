//! Codec implementations for strings.
//!
//! A string is written as its length in bytes (through the integer codec) followed by its UTF-8
//! bytes. Decoding validates the length against the remaining input before allocating, then
//! validates the bytes as UTF-8.

use crate::{
    schema::{Describe, Kind},
    util::{len_size, read_len, write_len},
    width, Config, EncodeSize, Error, Read, Write,
};
use bytes::{Buf, BufMut};

impl Write for str {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_len(self.len(), buf);
        buf.put_slice(self.as_bytes());
    }
}

impl EncodeSize for str {
    #[inline]
    fn encode_size(&self) -> usize {
        len_size(self.len()) + self.len()
    }
}

impl Describe for str {
    const KIND: Kind = Kind::String;
}

impl Write for String {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        self.as_str().write(buf);
    }
}

impl EncodeSize for String {
    #[inline]
    fn encode_size(&self) -> usize {
        self.as_str().encode_size()
    }
}

impl Read for String {
    const MIN_SIZE: usize = width::MIN_SIZE;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        let len = read_len(buf, cfg, 1)?;
        let mut bytes = vec![0; len];
        buf.copy_to_slice(&mut bytes);
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
    }
}

impl Describe for String {
    const KIND: Kind = Kind::String;
}
