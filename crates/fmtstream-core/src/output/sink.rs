//! Chunked stream writer.
//!
//! Transfers a fully assembled output buffer to a sink whose single-call
//! write capacity is bounded. Buffer lengths are `usize`, while a sink's
//! per-call count is typically a signed quantity, so every call is clamped
//! to the sink's maximum and the cursor advances by whatever the sink
//! reports as accepted.
//!
//! Design: there is no platform special-casing. When the buffer fits in one
//! chunk the loop simply runs once.

use std::io;

use log::{debug, trace, warn};

/// Largest count a sink accepts per call unless it says otherwise: the
/// largest signed transfer count representable on the platform.
pub const DEFAULT_MAX_CHUNK: usize = isize::MAX as usize;

/// Destination exposing a bounded single-operation write primitive.
pub trait ChunkSink {
    /// Maximum number of bytes that may be passed to one `write_chunk` call.
    fn max_chunk(&self) -> usize {
        DEFAULT_MAX_CHUNK
    }

    /// Offer `chunk` to the sink and return how many leading bytes it took.
    ///
    /// `chunk.len()` never exceeds `max_chunk()`. Returning fewer bytes
    /// than offered is a partial success, not an error.
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize>;
}

impl<S: ChunkSink + ?Sized> ChunkSink for &mut S {
    fn max_chunk(&self) -> usize {
        (**self).max_chunk()
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
        (**self).write_chunk(chunk)
    }
}

/// Adapts any [`io::Write`] into a [`ChunkSink`].
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    max_chunk: usize,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            max_chunk: DEFAULT_MAX_CHUNK,
        }
    }

    /// Wrap `inner`, limiting each call to `max_chunk` bytes (at least 1).
    pub fn with_max_chunk(inner: W, max_chunk: usize) -> Self {
        Self {
            inner,
            max_chunk: max_chunk.max(1),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> ChunkSink for IoSink<W> {
    fn max_chunk(&self) -> usize {
        self.max_chunk
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
        self.inner.write(chunk)
    }
}

/// Write all of `bytes` to `sink`, one bounded chunk at a time.
///
/// Bytes reach the sink in source order. An empty buffer makes no calls.
/// A sink that accepts zero bytes of a non-empty chunk stalls the transfer
/// and yields [`io::ErrorKind::WriteZero`]. Errors raised by the sink are
/// returned as-is with no retry.
pub fn write_buffer<S: ChunkSink + ?Sized>(sink: &mut S, bytes: &[u8]) -> io::Result<()> {
    let max_chunk = sink.max_chunk().max(1);
    let mut remaining = bytes;

    while !remaining.is_empty() {
        let chunk_len = remaining.len().min(max_chunk);
        let accepted = sink.write_chunk(&remaining[..chunk_len])?;
        trace!(
            "write_chunk offered={chunk_len} accepted={accepted} left={}",
            remaining.len()
        );

        if accepted == 0 {
            warn!("sink stalled with {} bytes outstanding", remaining.len());
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "sink accepted zero bytes of a non-empty chunk",
            ));
        }
        if accepted > chunk_len {
            debug!("sink over-reported {accepted} bytes for a {chunk_len}-byte chunk");
        }

        remaining = &remaining[accepted.min(chunk_len)..];
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call and accepts up to `accept_limit` bytes per call.
    struct RecordingSink {
        max_chunk: usize,
        accept_limit: usize,
        calls: Vec<usize>,
        received: Vec<u8>,
    }

    impl RecordingSink {
        fn new(max_chunk: usize, accept_limit: usize) -> Self {
            Self {
                max_chunk,
                accept_limit,
                calls: Vec::new(),
                received: Vec::new(),
            }
        }
    }

    impl ChunkSink for RecordingSink {
        fn max_chunk(&self) -> usize {
            self.max_chunk
        }

        fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
            assert!(chunk.len() <= self.max_chunk);
            self.calls.push(chunk.len());
            let take = chunk.len().min(self.accept_limit);
            self.received.extend_from_slice(&chunk[..take]);
            Ok(take)
        }
    }

    #[test]
    fn test_empty_buffer_makes_no_calls() {
        let mut sink = RecordingSink::new(4, 4);
        write_buffer(&mut sink, b"").unwrap();
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_single_chunk_when_buffer_fits() {
        let mut sink = RecordingSink::new(64, 64);
        write_buffer(&mut sink, b"foo").unwrap();
        assert_eq!(sink.calls, vec![3]);
        assert_eq!(sink.received, b"foo");
    }

    #[test]
    fn test_clamps_each_call_to_max_chunk() {
        let mut sink = RecordingSink::new(4, 4);
        write_buffer(&mut sink, b"0123456789").unwrap();
        assert_eq!(sink.calls, vec![4, 4, 2]);
        assert_eq!(sink.received, b"0123456789");
    }

    #[test]
    fn test_partial_accept_advances_by_accepted_count() {
        let mut sink = RecordingSink::new(4, 3);
        write_buffer(&mut sink, b"abcdefg").unwrap();
        assert_eq!(sink.calls, vec![4, 4, 1]);
        assert_eq!(sink.received, b"abcdefg");
    }

    #[test]
    fn test_zero_accept_is_a_stall() {
        let mut sink = RecordingSink::new(4, 0);
        let err = write_buffer(&mut sink, b"abc").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
        assert_eq!(sink.calls, vec![3]);
    }

    #[test]
    fn test_over_report_counts_as_full_chunk() {
        struct Boastful {
            calls: Vec<Vec<u8>>,
        }
        impl ChunkSink for Boastful {
            fn max_chunk(&self) -> usize {
                3
            }
            fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
                self.calls.push(chunk.to_vec());
                Ok(isize::MAX as usize)
            }
        }

        let mut sink = Boastful { calls: Vec::new() };
        write_buffer(&mut sink, b"abcdefgh").unwrap();
        assert_eq!(
            sink.calls,
            vec![b"abc".to_vec(), b"def".to_vec(), b"gh".to_vec()]
        );
    }

    #[test]
    fn test_sink_error_propagates_unmodified() {
        struct Failing;
        impl ChunkSink for Failing {
            fn write_chunk(&mut self, _chunk: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Interrupted, "signal"))
            }
        }

        let err = write_buffer(&mut Failing, b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
        assert_eq!(err.to_string(), "signal");
    }

    #[test]
    fn test_io_sink_writes_into_vec() {
        let mut sink = IoSink::with_max_chunk(Vec::new(), 2);
        write_buffer(&mut sink, b"hello").unwrap();
        assert_eq!(sink.into_inner(), b"hello");
    }

    #[test]
    fn test_io_sink_max_chunk_is_at_least_one() {
        let sink = IoSink::with_max_chunk(Vec::new(), 0);
        assert_eq!(sink.max_chunk(), 1);
        assert_eq!(IoSink::new(Vec::new()).max_chunk(), DEFAULT_MAX_CHUNK);
    }
}
