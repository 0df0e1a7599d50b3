//! Writing values into a [ByteSink].

use crate::{io::ByteSink, Encode};

/// Writes `value` into `sink` and returns the number of bytes written.
///
/// Encoding a well-typed value cannot fail, so any error is the sink's own.
///
/// # Examples
///
/// ```
/// use packwire_codec::serializer::serialize;
///
/// let mut sink = Vec::<u8>::new();
/// let written = serialize(&(5i8, String::from("hi")), &mut sink).unwrap();
/// assert_eq!(written, 6);
/// assert_eq!(sink, [0x01, 0x05, 0x01, 0x02, b'h', b'i']);
/// ```
pub fn serialize<T, S>(value: &T, sink: &mut S) -> Result<usize, S::Error>
where
    T: Encode + ?Sized,
    S: ByteSink + ?Sized,
{
    sink.put_value(value)
}

/// Writes consecutive values into one sink, counting the bytes written.
pub struct Serializer<S> {
    sink: S,
    written: usize,
}

impl<S: ByteSink> Serializer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, written: 0 }
    }

    /// Writes `value` and returns the number of bytes it took.
    pub fn serialize<T: Encode + ?Sized>(&mut self, value: &T) -> Result<usize, S::Error> {
        let len = serialize(value, &mut self.sink)?;
        self.written += len;
        Ok(len)
    }

    /// Total bytes written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}
