//! Error types for codec operations

use thiserror::Error;

/// Error type for decoding (and stream-filling) operations.
///
/// Encoding a well-typed value has no failure path of its own; the only errors on the
/// write side come from the sink and are returned unchanged.
#[derive(Error, Debug)]
pub enum Error {
    #[error("truncated input")]
    TruncatedInput,
    #[error("malformed width indicator: {0:#04x}")]
    MalformedWidthIndicator(u8),
    #[error("invalid bool: {0}")]
    InvalidBool(u8),
    #[error("invalid char: {0:#x}")]
    InvalidChar(u32),
    #[error("invalid utf-8 in string")]
    InvalidUtf8,
    #[error("invalid usize")]
    InvalidUsize,
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // found, max
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("stream error: {0}")]
    Io(#[from] std::io::Error),
}
