//! Value-to-text renderer.
//!
//! A stream-insertable value writes itself into an [`OStream`], a transient
//! append-only adapter over an intermediate [`FormatBuffer`]. The captured
//! bytes are the raw, unpadded text later handed to the spec reapplier.

use std::fmt;
use std::io;

use super::capability::StreamInsert;
use crate::output::FormatBuffer;

/// Append-only output adapter bound to one intermediate buffer.
///
/// Implements both [`io::Write`] and [`fmt::Write`]. The inherent
/// [`write_fmt`](OStream::write_fmt) lets `write!(os, ...)` work without
/// importing either trait.
#[derive(Debug)]
pub struct OStream<'a> {
    buf: &'a mut FormatBuffer,
}

impl<'a> OStream<'a> {
    pub fn new(buf: &'a mut FormatBuffer) -> Self {
        Self { buf }
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buf.append(bytes);
        Ok(())
    }

    /// Append formatted text produced by `format_args!`.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        io::Write::write_fmt(self, args)
    }

    /// Bytes written through this adapter's buffer so far.
    pub fn written(&self) -> usize {
        self.buf.len()
    }
}

impl io::Write for OStream<'_> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.append(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Write for OStream<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.append(s.as_bytes());
        Ok(())
    }
}

/// Render `value` through its stream overload into a fresh buffer.
///
/// The overload runs exactly once. If it fails, the error is returned as-is
/// and the partially filled buffer is dropped.
pub fn render<T: StreamInsert + ?Sized>(value: &T) -> io::Result<FormatBuffer> {
    let mut buf = FormatBuffer::new();
    value.stream_insert(&mut OStream::new(&mut buf))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Date {
        year: i32,
        month: u32,
        day: u32,
    }

    impl StreamInsert for Date {
        fn stream_insert(&self, os: &mut OStream<'_>) -> io::Result<()> {
            write!(os, "{}-{}-{}", self.year, self.month, self.day)
        }
    }

    struct Empty;

    impl StreamInsert for Empty {
        fn stream_insert(&self, os: &mut OStream<'_>) -> io::Result<()> {
            os.write_bytes(b"")
        }
    }

    struct Counted<'a> {
        calls: &'a Cell<u32>,
    }

    impl StreamInsert for Counted<'_> {
        fn stream_insert(&self, os: &mut OStream<'_>) -> io::Result<()> {
            self.calls.set(self.calls.get() + 1);
            os.write_bytes(b"x")
        }
    }

    struct Broken;

    impl StreamInsert for Broken {
        fn stream_insert(&self, os: &mut OStream<'_>) -> io::Result<()> {
            os.write_bytes(b"partial")?;
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad value"))
        }
    }

    #[test]
    fn test_render_captures_raw_text() {
        let date = Date {
            year: 2012,
            month: 12,
            day: 9,
        };
        let buf = render(&date).unwrap();
        assert_eq!(buf.as_bytes(), b"2012-12-9");
    }

    #[test]
    fn test_empty_rendering_is_valid() {
        let buf = render(&Empty).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_overload_runs_once() {
        let calls = Cell::new(0);
        render(&Counted { calls: &calls }).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_render_error_passes_through() {
        let err = render(&Broken).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "bad value");
    }

    #[test]
    fn test_fmt_write_appends() {
        let mut buf = FormatBuffer::new();
        let mut os = OStream::new(&mut buf);
        fmt::Write::write_str(&mut os, "ab").unwrap();
        fmt::Write::write_char(&mut os, 'c').unwrap();
        assert_eq!(os.written(), 3);
        assert_eq!(buf.as_bytes(), b"abc");
    }
}
