//! Byte sinks and sources.
//!
//! The codec itself only ever sees a [BufMut] while encoding and a [Buf] while decoding. The
//! adapters here connect those to owned buffers and to blocking [std::io] streams. The engine
//! never opens, closes, seeks or probes the length of a stream: a [StreamSource] is told how many
//! bytes it may read.

use crate::{Encode, Error};
use bytes::{Buf, Bytes, BytesMut};
use std::{
    convert::Infallible,
    io::{self, Read as _},
};
use tracing::debug;

/// A destination for encoded values.
pub trait ByteSink {
    /// The error produced by the sink itself. Encoding has no failure path of its own.
    type Error;

    /// Appends the encoding of `value` and returns the number of bytes written.
    fn put_value<T: Encode + ?Sized>(&mut self, value: &T) -> Result<usize, Self::Error>;
}

impl ByteSink for Vec<u8> {
    type Error = Infallible;

    #[inline]
    fn put_value<T: Encode + ?Sized>(&mut self, value: &T) -> Result<usize, Self::Error> {
        Ok(value.encode_to(self))
    }
}

impl ByteSink for BytesMut {
    type Error = Infallible;

    #[inline]
    fn put_value<T: Encode + ?Sized>(&mut self, value: &T) -> Result<usize, Self::Error> {
        Ok(value.encode_to(self))
    }
}

/// Writes encoded values to a blocking [io::Write].
///
/// Each value is encoded into a reusable scratch buffer and handed to the writer with a single
/// `write_all`. The writer is not flushed.
pub struct StreamSink<W> {
    writer: W,
    scratch: BytesMut,
}

impl<W: io::Write> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            scratch: BytesMut::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> ByteSink for StreamSink<W> {
    type Error = io::Error;

    fn put_value<T: Encode + ?Sized>(&mut self, value: &T) -> Result<usize, Self::Error> {
        self.scratch.clear();
        self.scratch.reserve(value.encode_size());
        let written = value.encode_to(&mut self.scratch);
        self.writer.write_all(&self.scratch)?;
        debug!(written, "wrote to stream sink");
        Ok(written)
    }
}

/// An origin of encoded values.
///
/// A decode asks for a window of at most `available` bytes, reads from it, then reports how many
/// bytes it used. Bytes past that point stay in the source.
pub trait ByteSource {
    /// Returns up to `available` bytes from the current position without consuming them.
    ///
    /// A window shorter than `available` means the source ran out.
    fn window(&mut self, available: usize) -> Result<Bytes, Error>;

    /// Consumes `n` bytes of the last window.
    fn consume(&mut self, n: usize);
}

impl ByteSource for Bytes {
    #[inline]
    fn window(&mut self, available: usize) -> Result<Bytes, Error> {
        Ok(self.slice(..available.min(self.len())))
    }

    #[inline]
    fn consume(&mut self, n: usize) {
        self.advance(n);
    }
}

impl ByteSource for &[u8] {
    #[inline]
    fn window(&mut self, available: usize) -> Result<Bytes, Error> {
        Ok(Bytes::copy_from_slice(&self[..available.min(self.len())]))
    }

    #[inline]
    fn consume(&mut self, n: usize) {
        self.advance(n);
    }
}

/// Reads encoded values from a blocking [io::Read].
///
/// Bytes pulled from the reader but not consumed by a decode are kept for the next one, so
/// consecutive values can be read from the same stream.
pub struct StreamSource<R> {
    reader: R,
    pending: Bytes,
}

impl<R: io::Read> StreamSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Bytes::new(),
        }
    }

    /// Bytes already read from the stream but not yet consumed.
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    /// Returns the underlying reader, dropping any buffered bytes.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: io::Read> ByteSource for StreamSource<R> {
    fn window(&mut self, available: usize) -> Result<Bytes, Error> {
        if self.pending.len() < available {
            let wanted = available - self.pending.len();
            let mut filled = Vec::with_capacity(self.pending.len());
            filled.extend_from_slice(&self.pending);
            let read = (&mut self.reader)
                .take(wanted as u64)
                .read_to_end(&mut filled)?;
            debug!(available, read, "filled stream source");
            self.pending = Bytes::from(filled);
        }
        Ok(self.pending.slice(..available.min(self.pending.len())))
    }

    fn consume(&mut self, n: usize) {
        self.pending.advance(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeExt, ReadExt};
    use std::{
        io::Cursor,
        sync::{Arc, Mutex},
    };

    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_vec_sink() {
        let mut sink = Vec::<u8>::new();
        assert_eq!(sink.put_value(&300u32), Ok(3));
        assert_eq!(sink.put_value("ab"), Ok(4));
        assert_eq!(sink, [0x02, 0x01, 0x2C, 0x01, 0x02, b'a', b'b']);
    }

    #[test]
    fn test_bytes_mut_sink() {
        let mut sink = BytesMut::new();
        assert_eq!(sink.put_value(&true), Ok(1));
        assert_eq!(sink.put_value(&-1i64), Ok(2));
        assert_eq!(sink, &[0x01, 0x01, 0xFF][..]);
    }

    #[test]
    fn test_stream_sink() {
        let mut sink = StreamSink::new(Vec::<u8>::new());
        assert_eq!(sink.put_value(&vec![1u16, 2]).unwrap(), 6);
        assert_eq!(sink.put_value(&5u8).unwrap(), 2);
        assert_eq!(sink.get_ref().len(), 8);
        assert_eq!(
            sink.into_inner(),
            [0x01, 0x02, 0x01, 0x01, 0x01, 0x02, 0x01, 0x05]
        );
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct CountingWriter {
        flushes: usize,
        data: Vec<u8>,
    }

    impl io::Write for CountingWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.data.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_stream_sink_writes_without_flushing() {
        let logs = Captured::default();
        let make_writer = {
            let logs = logs.clone();
            move || logs.clone()
        };
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(make_writer)
            .finish();

        let writer = tracing::subscriber::with_default(subscriber, || {
            let mut sink = StreamSink::new(CountingWriter {
                flushes: 0,
                data: Vec::new(),
            });
            assert_eq!(sink.put_value(&300u16).unwrap(), 3);
            sink.into_inner()
        });
        assert_eq!(writer.flushes, 0);
        assert_eq!(writer.data, [0x02, 0x01, 0x2C]);

        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("wrote to stream sink"));
        assert!(logs.contains("written=3"));
        assert!(!logs.contains("flushed"));
    }

    #[test]
    fn test_stream_sink_error() {
        let mut sink = StreamSink::new(FailingWriter);
        let err = sink.put_value(&1u8).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_bytes_source_window() {
        let mut source = Bytes::from_static(&[1, 2, 3, 4]);
        assert_eq!(source.window(2).unwrap(), &[1, 2][..]);
        assert_eq!(source.window(10).unwrap(), &[1, 2, 3, 4][..]);
        source.consume(3);
        assert_eq!(source.window(10).unwrap(), &[4][..]);
    }

    #[test]
    fn test_slice_source_window() {
        let data = [9u8, 8, 7];
        let mut source = &data[..];
        assert_eq!(source.window(1).unwrap(), &[9][..]);
        source.consume(1);
        assert_eq!(source.window(5).unwrap(), &[8, 7][..]);
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_stream_source_keeps_unconsumed_bytes() {
        let mut encoded = 7u8.encode().to_vec();
        encoded.extend_from_slice(&1000u32.encode());
        let mut source = StreamSource::new(Cursor::new(encoded));

        let mut window = source.window(16).unwrap();
        let first = u8::read(&mut window).unwrap();
        assert_eq!(first, 7);
        source.consume(2);
        assert_eq!(source.buffered(), 3);

        let second = u32::decode(source.window(16).unwrap()).unwrap();
        assert_eq!(second, 1000);
    }

    #[test]
    fn test_stream_source_reads_at_most_available() {
        let mut source = StreamSource::new(Cursor::new(vec![0u8; 100]));
        assert_eq!(source.window(10).unwrap().len(), 10);
        assert_eq!(source.buffered(), 10);
        let reader = source.into_inner();
        assert_eq!(reader.position(), 10);
    }

    #[test]
    fn test_stream_source_short_stream() {
        let mut source = StreamSource::new(Cursor::new(vec![1u8, 2]));
        assert_eq!(source.window(10).unwrap(), &[1, 2][..]);
    }

    #[test]
    fn test_stream_source_error() {
        let mut source = StreamSource::new(FailingReader);
        assert!(matches!(source.window(4), Err(Error::Io(_))));
    }
}
