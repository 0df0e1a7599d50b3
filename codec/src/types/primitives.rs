//! Codec implementations for Rust primitive types.
//!
//! # Integers
//!
//! Every integer, whatever its declared width, is written through [crate::width]: a width
//! indicator followed by the value in the narrowest of 1, 2, 4 or 8 bytes that holds it. A `u64`
//! holding `5` therefore costs two bytes, never nine.
//!
//! `usize` and `isize` are declared 64-bit on the wire so the format does not depend on the
//! target architecture. Decoding a value that does not fit the host's pointer width fails with
//! [Error::InvalidUsize].
//!
//! # Fixed-width leaves
//!
//! `bool` (one byte), `char` (four bytes) and `f32`/`f64` keep their native width and are
//! written big-endian. No width indicator precedes them.

use crate::{
    schema::{Describe, Kind},
    util::at_least,
    width::{self, Width},
    Config, EncodeSize, Error, Read, ReadExt, Write,
};
use bytes::{Buf, BufMut};

// Unsigned integers: zero-extended, narrowest unsigned rung.
macro_rules! impl_unsigned {
    ($type:ty, $width:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                width::write_unsigned(u64::from(*self), buf);
            }
        }

        impl EncodeSize for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                width::size_unsigned(u64::from(*self))
            }
        }

        impl Read for $type {
            const MIN_SIZE: usize = width::MIN_SIZE;

            #[inline]
            fn read_cfg(buf: &mut impl Buf, _: &Config) -> Result<Self, Error> {
                // The rung never exceeds the declared width, so the cast is lossless.
                Ok(width::read_unsigned(buf, Width::$width)? as $type)
            }
        }

        impl Describe for $type {
            const KIND: Kind = Kind::Integer {
                bits: <$type>::BITS,
                signed: false,
            };
        }
    };
}

// Signed integers: sign-extended, narrowest two's-complement rung.
macro_rules! impl_signed {
    ($type:ty, $width:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                width::write_signed(i64::from(*self), buf);
            }
        }

        impl EncodeSize for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                width::size_signed(i64::from(*self))
            }
        }

        impl Read for $type {
            const MIN_SIZE: usize = width::MIN_SIZE;

            #[inline]
            fn read_cfg(buf: &mut impl Buf, _: &Config) -> Result<Self, Error> {
                // The rung never exceeds the declared width, so the cast is lossless.
                Ok(width::read_signed(buf, Width::$width)? as $type)
            }
        }

        impl Describe for $type {
            const KIND: Kind = Kind::Integer {
                bits: <$type>::BITS,
                signed: true,
            };
        }
    };
}

impl_unsigned!(u8, W8);
impl_unsigned!(u16, W16);
impl_unsigned!(u32, W32);
impl_unsigned!(u64, W64);
impl_signed!(i8, W8);
impl_signed!(i16, W16);
impl_signed!(i32, W32);
impl_signed!(i64, W64);

// Usize implementation
impl Write for usize {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        width::write_unsigned(*self as u64, buf);
    }
}

impl EncodeSize for usize {
    #[inline]
    fn encode_size(&self) -> usize {
        width::size_unsigned(*self as u64)
    }
}

impl Read for usize {
    const MIN_SIZE: usize = width::MIN_SIZE;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &Config) -> Result<Self, Error> {
        let value = width::read_unsigned(buf, Width::W64)?;
        usize::try_from(value).map_err(|_| Error::InvalidUsize)
    }
}

impl Describe for usize {
    const KIND: Kind = Kind::Integer {
        bits: 64,
        signed: false,
    };
}

// Isize implementation
impl Write for isize {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        width::write_signed(*self as i64, buf);
    }
}

impl EncodeSize for isize {
    #[inline]
    fn encode_size(&self) -> usize {
        width::size_signed(*self as i64)
    }
}

impl Read for isize {
    const MIN_SIZE: usize = width::MIN_SIZE;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &Config) -> Result<Self, Error> {
        let value = width::read_signed(buf, Width::W64)?;
        isize::try_from(value).map_err(|_| Error::InvalidUsize)
    }
}

impl Describe for isize {
    const KIND: Kind = Kind::Integer {
        bits: 64,
        signed: true,
    };
}

// Float implementation
macro_rules! impl_float {
    ($type:ty, $read_method:ident, $write_method:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                buf.$write_method(*self);
            }
        }

        impl EncodeSize for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                std::mem::size_of::<$type>()
            }
        }

        impl Read for $type {
            const MIN_SIZE: usize = std::mem::size_of::<$type>();

            #[inline]
            fn read_cfg(buf: &mut impl Buf, _: &Config) -> Result<Self, Error> {
                at_least(buf, std::mem::size_of::<$type>())?;
                Ok(buf.$read_method())
            }
        }

        impl Describe for $type {
            const KIND: Kind = Kind::Float {
                bits: std::mem::size_of::<$type>() as u32 * 8,
            };
        }
    };
}

impl_float!(f32, get_f32, put_f32);
impl_float!(f64, get_f64, put_f64);

// Bool implementation
impl Write for bool {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(u8::from(*self));
    }
}

impl EncodeSize for bool {
    #[inline]
    fn encode_size(&self) -> usize {
        1
    }
}

impl Read for bool {
    const MIN_SIZE: usize = 1;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &Config) -> Result<Self, Error> {
        at_least(buf, 1)?;
        match buf.get_u8() {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::InvalidBool(other)),
        }
    }
}

impl Describe for bool {
    const KIND: Kind = Kind::Bool;
}

// Char implementation
impl Write for char {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u32(u32::from(*self));
    }
}

impl EncodeSize for char {
    #[inline]
    fn encode_size(&self) -> usize {
        4
    }
}

impl Read for char {
    const MIN_SIZE: usize = 4;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &Config) -> Result<Self, Error> {
        at_least(buf, 4)?;
        let scalar = buf.get_u32();
        char::from_u32(scalar).ok_or(Error::InvalidChar(scalar))
    }
}

impl Describe for char {
    const KIND: Kind = Kind::Char;
}

// Option implementation
impl<T: Write> Write for Option<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        self.is_some().write(buf);
        if let Some(inner) = self {
            inner.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for Option<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        match self {
            Some(inner) => 1 + inner.encode_size(),
            None => 1,
        }
    }
}

impl<T: Read> Read for Option<T> {
    const MIN_SIZE: usize = 1;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        if bool::read(buf)? {
            Ok(Some(T::read_cfg(buf, cfg)?))
        } else {
            Ok(None)
        }
    }
}

impl<T: Describe> Describe for Option<T> {
    const KIND: Kind = Kind::Optional { inner: &T::KIND };
}
