//! Argument dispatch and the top-level `format`/`print` entry points.
//!
//! Each replacement field is resolved against the argument list and routed
//! either to the stream path (render, then reapply the spec) or to the
//! native formatter. Output is accumulated in one [`FormatBuffer`]; `print`
//! flushes it to a sink exactly once, after the whole string is assembled.

use std::io;

use crate::error::{FormatError, Result};
use crate::native::format_native;
use crate::output::{ChunkSink, FormatBuffer, IoSink, write_buffer};
use crate::spec::{Count, FormatSpec, Segment, parse_format_string};
use crate::stream::{Arg, format_stream_value};

/// Replace `Count::Arg` width/precision with the referenced integer value.
pub fn resolve_spec(spec: &FormatSpec, args: &[Arg<'_>]) -> Result<FormatSpec> {
    let mut resolved = *spec;
    resolved.width = resolve_count(spec.width, args)?;
    resolved.precision = resolve_count(spec.precision, args)?;
    Ok(resolved)
}

fn resolve_count(count: Count, args: &[Arg<'_>]) -> Result<Count> {
    match count {
        Count::Arg(index) => {
            let arg = args.get(index).ok_or(FormatError::ArgumentIndex(index))?;
            arg.as_count()
                .map(Count::Fixed)
                .ok_or(FormatError::InvalidDynamicArg)
        }
        other => Ok(other),
    }
}

/// Append one argument formatted per an already resolved `spec`.
pub fn write_arg(arg: &Arg<'_>, spec: &FormatSpec, out: &mut FormatBuffer) -> Result<()> {
    match *arg {
        Arg::Stream(value) => {
            if !matches!(spec.ty, None | Some(b's')) {
                return Err(FormatError::Parse("invalid type specifier"));
            }
            format_stream_value(value, spec, out)
        }
        _ => format_native(arg, spec, out),
    }
}

/// Format `fmt` with `args`, appending to `out` in argument order.
///
/// On error, text for fields before the failing one stays in `out`.
pub fn vformat_to(out: &mut FormatBuffer, fmt: &str, args: &[Arg<'_>]) -> Result<()> {
    for segment in parse_format_string(fmt)? {
        match segment {
            Segment::Literal(text) => out.append(text.as_bytes()),
            Segment::Field { index, spec } => {
                let arg = args.get(index).ok_or(FormatError::ArgumentIndex(index))?;
                let spec = resolve_spec(&spec, args)?;
                write_arg(arg, &spec, out)?;
            }
        }
    }
    Ok(())
}

/// Format `fmt` with `args` into a new string.
pub fn vformat(fmt: &str, args: &[Arg<'_>]) -> Result<String> {
    let mut out = FormatBuffer::new();
    vformat_to(&mut out, fmt, args)?;
    Ok(out.into_string())
}

/// Format `fmt` with `args`, then flush the result to `sink`.
///
/// Nothing reaches the sink if formatting fails.
pub fn vprint<S: ChunkSink + ?Sized>(sink: &mut S, fmt: &str, args: &[Arg<'_>]) -> Result<()> {
    let mut out = FormatBuffer::new();
    vformat_to(&mut out, fmt, args)?;
    write_buffer(sink, out.as_bytes())?;
    Ok(())
}

/// [`vprint`] to any [`io::Write`].
pub fn vprint_io<W: io::Write>(writer: W, fmt: &str, args: &[Arg<'_>]) -> Result<()> {
    vprint(&mut IoSink::new(writer), fmt, args)
}

/// Format to a `String`, classifying each argument at compile time.
///
/// ```
/// use fmtstream_core::stream_format;
///
/// let s = stream_format!("{0:*<5}|{1:>4}", "def", 42_i32).unwrap();
/// assert_eq!(s, "def**|  42");
/// ```
#[macro_export]
macro_rules! stream_format {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::stream::kind::{NativeKind as _, StreamKind as _};
        $crate::format::vformat($fmt, &[$( (&&$arg).format_arg() ),*])
    }};
}

/// Format and flush to a writer, or to a [`ChunkSink`] with `sink: ...`.
///
/// ```
/// use fmtstream_core::stream_print;
///
/// let mut os = Vec::new();
/// stream_print!(&mut os, "Don't {}!", "panic").unwrap();
/// assert_eq!(os, b"Don't panic!");
/// ```
#[macro_export]
macro_rules! stream_print {
    (sink: $sink:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::stream::kind::{NativeKind as _, StreamKind as _};
        $crate::format::vprint($sink, $fmt, &[$( (&&$arg).format_arg() ),*])
    }};
    ($writer:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::stream::kind::{NativeKind as _, StreamKind as _};
        $crate::format::vprint_io($writer, $fmt, &[$( (&&$arg).format_arg() ),*])
    }};
}
