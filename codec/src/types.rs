//! Codec implementations for common types.
//!
//! Composite types are written by combining the integer codec (for length prefixes) with a
//! recursive call per element:
//!
//! - [string]: length prefix in bytes, then UTF-8 bytes.
//! - [array]: fixed-size arrays, elements only.
//! - [vec]: vectors and deques, length prefix then elements.
//! - [collections]: sets (like sequences) and maps (length prefix, then key/value pairs).
//! - [tuple]: elements back to back.
//! - [primitives]: integers, floats, `bool`, `char` and `Option`.

pub mod array;
pub mod collections;
pub mod primitives;
pub mod string;
pub mod tuple;
pub mod vec;
