//! # fmtstream-core
//!
//! Stream-adapter layer of a text-formatting engine.
//!
//! Values that only know how to write themselves to a stream (through
//! [`StreamInsert`]) take part in the brace format-spec language exactly like
//! native kinds: the value is rendered into an intermediate buffer, then
//! width, fill, alignment and precision are reapplied to the captured text.
//! Finished output is flushed to sinks with a bounded per-call capacity by
//! [`write_buffer`], which splits the transfer into clamped chunks.
//!
//! No `unsafe` code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod error;
pub mod format;
pub mod native;
pub mod output;
pub mod spec;
pub mod stream;

pub use error::{FormatError, Result};
pub use format::{vformat, vformat_to, vprint, vprint_io};
pub use output::{ChunkSink, FormatBuffer, IoSink, write_buffer};
pub use spec::{Align, Count, FormatSpec, MAX_COUNT, Sign};
pub use stream::{Arg, NativeArg, OStream, StreamInsert, format_stream_value};
