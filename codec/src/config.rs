//! Configuration passed to [crate::Read::read_cfg].

use crate::Error;

/// Limits applied while decoding untrusted input.
///
/// Every length prefix (string bytes, sequence, set and map entry counts) is checked against
/// `max_len` before anything is allocated. Independently of this limit, a length is always
/// rejected when the remaining input cannot possibly hold that many elements.
///
/// # Examples
///
/// ```
/// use packwire_codec::Config;
///
/// let cfg = Config::new().with_max_len(1024);
/// assert!(cfg.check_len(512).is_ok());
/// assert!(cfg.check_len(2048).is_err());
///
/// // The default accepts any length.
/// assert!(Config::default().check_len(usize::MAX).is_ok());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Config {
    /// The largest length prefix accepted.
    max_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_len: usize::MAX,
        }
    }
}

impl Config {
    /// Creates a configuration that accepts any length.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this configuration that rejects lengths above `max_len`.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// The largest length prefix accepted.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Returns an error if `len` exceeds the configured maximum.
    #[inline]
    pub fn check_len(&self, len: usize) -> Result<(), Error> {
        if len > self.max_len {
            return Err(Error::LengthExceeded(len, self.max_len));
        }
        Ok(())
    }
}
