//! Serialize structured data.
//!
//! # Overview
//!
//! A compact, positional binary format for plain Rust values:
//! - Serialize structured data into bytes with no schema, tags or framing
//! - Deserialize untrusted bytes back into structured data, failing cleanly on bad input
//!
//! Integers are written with a one-byte width indicator followed by the value in the narrowest
//! big-endian width that holds it, so small numbers stay small whatever their declared type.
//! Everything else is built from that: strings, sequences, sets and maps carry an integer length
//! prefix, options carry a presence flag, and arrays, tuples and nested records are written as
//! their elements back to back.
//!
//! # Supported Types
//!
//! Natively supports:
//! - Primitives: `u8`..`u64`, `i8`..`i64`, `usize`, `isize`, `f32`, `f64`, `bool`, `char`
//! - Strings: `String` (and `str` for encoding)
//! - Collections: `Vec<T>`, `VecDeque<T>`, `BTreeSet<T>`, `HashSet<T>`, `BTreeMap<K, V>`,
//!   `HashMap<K, V>`, `Option<T>`, tuples up to 12 elements and arrays `[T; N]`
//! - Structs: named, tuple and unit structs via `#[derive(Record)]`, nesting to any depth
//!
//! Types without a codec (references, raw pointers, trait objects, `Rc`/`Arc`, enums, unions)
//! are rejected when the derive is compiled.
//!
//! # Example
//!
//! ```
//! use packwire_codec::{decode, encode, Record};
//! use std::collections::BTreeMap;
//!
//! #[derive(Record, Debug, PartialEq)]
//! struct Inventory {
//!     owner: String,
//!     slots: u8,
//!     items: BTreeMap<String, u32>,
//!     location: Option<(i64, i64)>,
//! }
//!
//! let inventory = Inventory {
//!     owner: String::from("alice"),
//!     slots: 12,
//!     items: [(String::from("rope"), 2)].into_iter().collect(),
//!     location: Some((-40, 1_000_000)),
//! };
//!
//! let encoded = encode(&inventory);
//! let decoded: Inventory = decode(encoded).unwrap();
//! assert_eq!(inventory, decoded);
//! ```
//!
//! # Example (Manual Implementation)
//!
//! The derive is a convenience: any type can implement the traits itself.
//!
//! ```
//! use bytes::{Buf, BufMut};
//! use packwire_codec::{
//!     schema::{Describe, Kind},
//!     Config, DecodeExt, Encode, EncodeSize, Error, Read, Write,
//! };
//!
//! #[derive(Debug, PartialEq)]
//! struct Celsius(i16);
//!
//! impl Write for Celsius {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         self.0.write(buf);
//!     }
//! }
//!
//! impl EncodeSize for Celsius {
//!     fn encode_size(&self) -> usize {
//!         self.0.encode_size()
//!     }
//! }
//!
//! impl Read for Celsius {
//!     const MIN_SIZE: usize = i16::MIN_SIZE;
//!
//!     fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
//!         Ok(Self(i16::read_cfg(buf, cfg)?))
//!     }
//! }
//!
//! impl Describe for Celsius {
//!     const KIND: Kind = i16::KIND;
//! }
//!
//! let encoded = Celsius(-12).encode();
//! assert_eq!(encoded.len(), 2);
//! assert_eq!(Celsius::decode_exact(encoded).unwrap(), Celsius(-12));
//! ```
//!
//! # Unsupported Members
//!
//! A record whose fields cannot be encoded does not compile:
//!
//! ```compile_fail
//! use packwire_codec::Record;
//! use std::rc::Rc;
//!
//! #[derive(Record)]
//! struct Shared {
//!     name: Rc<String>,
//! }
//! ```
//!
//! ```compile_fail
//! use packwire_codec::Record;
//!
//! #[derive(Record)]
//! struct Borrowed<'a> {
//!     name: &'a str,
//! }
//! ```
//!
//! Neither does deriving for an enum:
//!
//! ```compile_fail
//! use packwire_codec::Record;
//!
//! #[derive(Record)]
//! enum Shape {
//!     Circle(u32),
//!     Square(u32),
//! }
//! ```

// Lets the derive refer to `::packwire_codec` from inside this crate's own tests.
extern crate self as packwire_codec;

pub mod codec;
pub mod config;
pub mod deserializer;
pub mod error;
pub mod io;
pub mod schema;
pub mod serializer;
pub mod types;
pub mod util;
pub mod width;

// Re-export main types and traits
pub use codec::{Codec, Decode, DecodeExt, Encode, EncodeSize, Read, ReadExt, Write};
pub use config::Config;
pub use error::Error;
pub use packwire_codec_derive::Record;
pub use schema::{Describe, Record};

use bytes::{Buf, Bytes};
use io::{ByteSink, ByteSource};

#[doc(hidden)]
pub mod __private {
    pub use bytes::{Buf, BufMut};
}

/// Encodes `value` into a new buffer.
pub fn encode<T: Encode + ?Sized>(value: &T) -> Bytes {
    value.encode().freeze()
}

/// Appends the encoding of `value` to `sink`, returning the number of bytes written.
pub fn encode_into<T, S>(value: &T, sink: &mut S) -> Result<usize, S::Error>
where
    T: Encode + ?Sized,
    S: ByteSink + ?Sized,
{
    serializer::serialize(value, sink)
}

/// Decodes a `T` from the start of `buf`.
///
/// The remaining length of `buf` is the available length. Bytes after the value are ignored; use
/// [decode_exact] to reject them.
pub fn decode<T: Decode>(buf: impl Buf) -> Result<T, Error> {
    T::decode_cfg(buf, &Config::default())
}

/// Decodes a `T` that must occupy all of `buf`.
pub fn decode_exact<T: Decode>(buf: impl Buf) -> Result<T, Error> {
    T::decode_exact_cfg(buf, &Config::default())
}

/// Decodes a `T` from at most `available` bytes of `source`.
pub fn decode_from<T, S>(source: &mut S, available: usize) -> Result<T, Error>
where
    T: Read,
    S: ByteSource + ?Sized,
{
    deserializer::deserialize(source, available, &Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_round_trip() {
        let value = (String::from("x"), vec![1u64, 1 << 40]);
        let encoded = encode(&value);
        assert_eq!(encoded.len(), value.encode_size());
        assert_eq!(decode::<(String, Vec<u64>)>(encoded).unwrap(), value);
    }

    #[test]
    fn test_decode_is_lenient() {
        let mut encoded = encode(&9u16).to_vec();
        encoded.push(0xFF);
        assert_eq!(decode::<u16>(&encoded[..]).unwrap(), 9);
        assert!(matches!(
            decode_exact::<u16>(&encoded[..]),
            Err(Error::ExtraData(1))
        ));
    }

    #[test]
    fn test_encode_into_and_decode_from() {
        let mut sink = Vec::<u8>::new();
        assert_eq!(encode_into(&'x', &mut sink), Ok(4));
        assert_eq!(encode_into(&-2i8, &mut sink), Ok(2));

        let mut source = Bytes::from(sink);
        assert_eq!(decode_from::<char, _>(&mut source, 4).unwrap(), 'x');
        assert_eq!(decode_from::<i8, _>(&mut source, 4).unwrap(), -2);
        assert!(matches!(
            decode_from::<i8, _>(&mut source, 4),
            Err(Error::TruncatedInput)
        ));
    }
}
