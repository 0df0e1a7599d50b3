//! Reading values out of a [ByteSource].

use crate::{io::ByteSource, util::at_least, Config, Error, Read};
use bytes::{Buf, Bytes};
use std::any::type_name;
use tracing::{debug, trace};

/// Decodes one `T` from at most `available` bytes of `source`.
///
/// `available` is an upper bound: bytes of the window left over after the value stay in the
/// source and are not an error. Reading past the window fails with [Error::TruncatedInput]. On
/// error nothing is consumed from `source`.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use packwire_codec::{deserializer::deserialize, Config};
///
/// let mut source = Bytes::from_static(&[0x02, 0x02, 0x00, 0x01, 0x01]);
/// let value: u16 = deserialize(&mut source, 16, &Config::default()).unwrap();
/// assert_eq!(value, 512);
///
/// let flag: bool = deserialize(&mut source, 16, &Config::default()).unwrap();
/// assert!(flag);
/// ```
pub fn deserialize<T, S>(source: &mut S, available: usize, cfg: &Config) -> Result<T, Error>
where
    T: Read,
    S: ByteSource + ?Sized,
{
    let mut window = source.window(available)?;
    let total = window.len();
    let value = read_value::<T>(&mut window, cfg)?;
    let consumed = total - window.remaining();
    source.consume(consumed);
    Ok(value)
}

/// Reads one `T` from the front of `buf`, logging the outcome.
fn read_value<T: Read>(buf: &mut Bytes, cfg: &Config) -> Result<T, Error> {
    let before = buf.remaining();
    let result = at_least(&*buf, T::MIN_SIZE).and_then(|_| T::read_cfg(buf, cfg));
    match &result {
        Ok(_) => {
            let remaining = buf.remaining();
            trace!(consumed = before - remaining, remaining, "decoded value");
        }
        Err(err) => {
            debug!(?err, ty = type_name::<T>(), "decode failed");
        }
    }
    result
}

/// A cursor decoding consecutive values from one byte window.
///
/// # Examples
///
/// ```
/// use packwire_codec::{deserializer::Deserializer, encode_into};
///
/// let mut buf = Vec::<u8>::new();
/// encode_into(&7u32, &mut buf).unwrap();
/// encode_into("seven", &mut buf).unwrap();
///
/// let mut deserializer = Deserializer::new(buf);
/// assert_eq!(deserializer.next::<u32>().unwrap(), 7);
/// assert_eq!(deserializer.next::<String>().unwrap(), "seven");
/// assert!(deserializer.finish().is_ok());
/// ```
pub struct Deserializer {
    buf: Bytes,
    total: usize,
    cfg: Config,
}

impl Deserializer {
    /// Creates a cursor over `buf` using the default [Config].
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self::with_config(buf, Config::default())
    }

    pub fn with_config(buf: impl Into<Bytes>, cfg: Config) -> Self {
        let buf = buf.into();
        Self {
            total: buf.len(),
            buf,
            cfg,
        }
    }

    /// Takes at most `available` bytes out of `source` and creates a cursor over them.
    pub fn from_source<S: ByteSource + ?Sized>(
        source: &mut S,
        available: usize,
        cfg: Config,
    ) -> Result<Self, Error> {
        let window = source.window(available)?;
        source.consume(window.len());
        Ok(Self::with_config(window, cfg))
    }

    /// Decodes the next value.
    ///
    /// On error the cursor position is unspecified.
    pub fn next<T: Read>(&mut self) -> Result<T, Error> {
        read_value(&mut self.buf, &self.cfg)
    }

    /// Bytes not yet decoded.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Bytes decoded so far.
    pub fn consumed(&self) -> usize {
        self.total - self.buf.len()
    }

    /// Ends decoding, failing with [Error::ExtraData] if bytes remain.
    pub fn finish(self) -> Result<(), Error> {
        if !self.buf.is_empty() {
            return Err(Error::ExtraData(self.buf.len()));
        }
        Ok(())
    }
}
