//! Width-shrinking integer encoding and decoding
//!
//! Every integer is written as a one-byte width indicator followed by the value in the fewest
//! bytes of the ladder `1, 2, 4, 8` that hold it losslessly, big-endian:
//!
//! ```text
//! u64 = 5         -> 01 05
//! i32 = 1600      -> 02 06 40
//! i16 = -2        -> 01 FE
//! u64 = u64::MAX  -> 08 FF FF FF FF FF FF FF FF
//! ```
//!
//! The indicator is the rung's byte count, so a decoder recovers how many bytes follow without
//! knowing the declared width of the field. Signed values are compared against the
//! two's-complement range of each rung and sign-extended on decode; unsigned values are
//! zero-extended.

use crate::{util::at_least, Error};
use bytes::{Buf, BufMut};

/// Size of the width indicator preceding every integer.
pub const INDICATOR_SIZE: usize = 1;

/// The smallest possible encoding of an integer: the indicator and one data byte.
pub const MIN_SIZE: usize = INDICATOR_SIZE + 1;

/// A rung of the integer width ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    /// All rungs, narrowest first.
    pub const LADDER: [Width; 4] = [Width::W8, Width::W16, Width::W32, Width::W64];

    /// Number of data bytes written for this rung.
    pub const fn len(self) -> usize {
        match self {
            Width::W8 => 1,
            Width::W16 => 2,
            Width::W32 => 4,
            Width::W64 => 8,
        }
    }

    /// Number of data bits written for this rung.
    pub const fn bits(self) -> u32 {
        self.len() as u32 * 8
    }

    /// The marker byte announcing this rung.
    pub const fn indicator(self) -> u8 {
        self.len() as u8
    }

    /// Parses a marker byte.
    pub fn from_indicator(marker: u8) -> Result<Self, Error> {
        match marker {
            1 => Ok(Width::W8),
            2 => Ok(Width::W16),
            4 => Ok(Width::W32),
            8 => Ok(Width::W64),
            _ => Err(Error::MalformedWidthIndicator(marker)),
        }
    }

    /// Returns the rung matching a declared bit width, if any.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Width::W8),
            16 => Some(Width::W16),
            32 => Some(Width::W32),
            64 => Some(Width::W64),
            _ => None,
        }
    }

    /// Returns the narrowest rung whose unsigned range contains `value`.
    pub const fn for_unsigned(value: u64) -> Self {
        if value <= u8::MAX as u64 {
            Width::W8
        } else if value <= u16::MAX as u64 {
            Width::W16
        } else if value <= u32::MAX as u64 {
            Width::W32
        } else {
            Width::W64
        }
    }

    /// Returns the narrowest rung whose two's-complement range contains `value`.
    pub const fn for_signed(value: i64) -> Self {
        if value >= i8::MIN as i64 && value <= i8::MAX as i64 {
            Width::W8
        } else if value >= i16::MIN as i64 && value <= i16::MAX as i64 {
            Width::W16
        } else if value >= i32::MIN as i64 && value <= i32::MAX as i64 {
            Width::W32
        } else {
            Width::W64
        }
    }
}

/// Encodes an unsigned integer using the narrowest rung that holds it.
pub fn write_unsigned(value: u64, buf: &mut impl BufMut) {
    let width = Width::for_unsigned(value);
    buf.put_u8(width.indicator());
    buf.put_slice(&value.to_be_bytes()[8 - width.len()..]);
}

/// Encodes a signed integer using the narrowest rung that holds it.
pub fn write_signed(value: i64, buf: &mut impl BufMut) {
    let width = Width::for_signed(value);
    buf.put_u8(width.indicator());
    buf.put_slice(&value.to_be_bytes()[8 - width.len()..]);
}

/// Reads the width indicator and checks that its data bytes are present.
///
/// A rung wider than `declared` is rejected: no encoder produces it for a field of that width.
fn read_width(buf: &mut impl Buf, declared: Width) -> Result<Width, Error> {
    at_least(buf, INDICATOR_SIZE)?;
    let marker = buf.get_u8();
    let width = Width::from_indicator(marker)?;
    if width > declared {
        return Err(Error::MalformedWidthIndicator(marker));
    }
    at_least(buf, width.len())?;
    Ok(width)
}

/// Decodes an unsigned integer declared as `declared`, zero-extending it to 64 bits.
///
/// The result always fits in the declared width.
pub fn read_unsigned(buf: &mut impl Buf, declared: Width) -> Result<u64, Error> {
    let width = read_width(buf, declared)?;
    Ok(buf.get_uint(width.len()))
}

/// Decodes a signed integer declared as `declared`, sign-extending it to 64 bits.
///
/// The result always fits in the declared width.
pub fn read_signed(buf: &mut impl Buf, declared: Width) -> Result<i64, Error> {
    let width = read_width(buf, declared)?;
    let raw = buf.get_uint(width.len());
    let shift = 64 - width.bits();
    Ok(((raw << shift) as i64) >> shift)
}

/// Calculates the number of bytes needed to encode an unsigned integer.
pub const fn size_unsigned(value: u64) -> usize {
    INDICATOR_SIZE + Width::for_unsigned(value).len()
}

/// Calculates the number of bytes needed to encode a signed integer.
pub const fn size_signed(value: i64) -> usize {
    INDICATOR_SIZE + Width::for_signed(value).len()
}
