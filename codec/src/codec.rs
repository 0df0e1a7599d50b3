//! Core codec traits and implementations

use crate::{schema::Describe, util::at_least, Config, Error};
use bytes::{Buf, BufMut, BytesMut};

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// Implementations should panic if the buffer doesn't have enough capacity.
    fn write(&self, buf: &mut impl BufMut);
}

/// Trait for types that know the exact size of their encoding.
pub trait EncodeSize {
    /// Returns the encoded length of this value.
    ///
    /// This method MUST return the exact number of bytes that will be written by `write()`.
    fn encode_size(&self) -> usize;
}

/// Trait for types that can be read/decoded from a buffer.
pub trait Read: Sized {
    /// The fewest bytes any encoding of this type can occupy.
    ///
    /// Used to reject length prefixes that claim more elements than the remaining input can
    /// possibly hold, before any storage is allocated.
    const MIN_SIZE: usize;

    /// Reads a value from the buffer using the provided configuration `cfg`, consuming the
    /// necessary bytes.
    ///
    /// Returns an error if decoding fails (e.g., invalid data, not enough bytes). On error the
    /// number of bytes consumed from `buf` is unspecified.
    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error>;
}

/// Trait for types that can be encoded to a buffer.
pub trait Encode: Write + EncodeSize {
    /// Encodes a value to a `BytesMut` buffer.
    ///
    /// Panics if the `write` implementation does not write the expected number of bytes.
    ///
    /// (Provided method).
    fn encode(&self) -> BytesMut {
        let len = self.encode_size();
        let mut buffer = BytesMut::with_capacity(len);
        self.write(&mut buffer);
        assert_eq!(buffer.len(), len, "write() did not write expected bytes");
        buffer
    }

    /// Appends the encoding to `buf` and returns the number of bytes written.
    ///
    /// (Provided method).
    fn encode_to(&self, buf: &mut impl BufMut) -> usize {
        let len = self.encode_size();
        self.write(buf);
        len
    }
}

// Automatically implement `Encode` for types that can be written and sized.
impl<T: Write + EncodeSize + ?Sized> Encode for T {}

/// Trait for types that can be decoded from the start of a buffer.
pub trait Decode: Read {
    /// Decodes a value from the start of `buf`.
    ///
    /// The remaining length of `buf` is the available length: reading past it fails with
    /// [Error::TruncatedInput]. Bytes left over after the value are ignored.
    ///
    /// (Provided method).
    fn decode_cfg(mut buf: impl Buf, cfg: &Config) -> Result<Self, Error> {
        at_least(&buf, Self::MIN_SIZE)?;
        Self::read_cfg(&mut buf, cfg)
    }

    /// Decodes a value from a buffer, ensuring the buffer is fully consumed.
    ///
    /// (Provided method).
    fn decode_exact_cfg(mut buf: impl Buf, cfg: &Config) -> Result<Self, Error> {
        at_least(&buf, Self::MIN_SIZE)?;
        let result = Self::read_cfg(&mut buf, cfg)?;

        // Check that the buffer is fully consumed.
        let remaining = buf.remaining();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }

        Ok(result)
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

/// Trait for types that can be encoded, decoded and described.
///
/// Every field of a `#[derive(Record)]` struct must implement this trait.
pub trait Codec: Encode + Decode + Describe {}

// Automatically implement `Codec` for types that implement `Encode`, `Decode` and `Describe`.
impl<T: Encode + Decode + Describe> Codec for T {}

/// Extension trait providing an ergonomic read method using the default [Config].
pub trait ReadExt: Read {
    /// Reads a value using the default config.
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        Self::read_cfg(buf, &Config::default())
    }
}

// Automatically implement `ReadExt` for types that implement `Read`.
impl<T: Read> ReadExt for T {}

/// Extension trait providing ergonomic decode methods using the default [Config].
pub trait DecodeExt: Decode {
    /// Decodes a value using the default config.
    fn decode(buf: impl Buf) -> Result<Self, Error> {
        Self::decode_cfg(buf, &Config::default())
    }

    /// Decodes a value using the default config, rejecting trailing bytes.
    fn decode_exact(buf: impl Buf) -> Result<Self, Error> {
        Self::decode_exact_cfg(buf, &Config::default())
    }
}

// Automatically implement `DecodeExt` for types that implement `Decode`.
impl<T: Decode> DecodeExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use bytes::Bytes;

    #[test]
    fn test_insufficient_buffer() {
        // Indicator promises four bytes, only two follow.
        let mut reader = Bytes::from_static(&[0x04, 0x01, 0x02]);
        assert!(matches!(u32::read(&mut reader), Err(Error::TruncatedInput)));
    }

    #[test]
    fn test_empty_buffer() {
        assert!(matches!(
            u8::decode(Bytes::new()),
            Err(Error::TruncatedInput)
        ));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let encoded = Bytes::from_static(&[0x01, 0x07, 0xFF]);
        assert_eq!(u8::decode(encoded).unwrap(), 7);
    }

    #[test]
    fn test_extra_data() {
        let encoded = Bytes::from_static(&[0x01, 0x07, 0xFF]);
        assert!(matches!(u8::decode_exact(encoded), Err(Error::ExtraData(1))));
    }

    #[test]
    fn test_encode_to() {
        let mut buf = Vec::new();
        let written = 300u32.encode_to(&mut buf);
        assert_eq!(written, 3);
        assert_eq!(buf, [0x02, 0x01, 0x2C]);
    }

    #[test]
    fn test_encode_matches_size() {
        let value = (7u64, Some(-1i16), String::from("abc"));
        assert_eq!(value.encode().len(), value.encode_size());
    }
}
