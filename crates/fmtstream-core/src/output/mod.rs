//! Output side: the accumulation buffer and the chunked flush to a sink.

pub mod buffer;
pub mod sink;

pub use buffer::{FormatBuffer, INLINE_BUFFER_SIZE};
pub use sink::{ChunkSink, DEFAULT_MAX_CHUNK, IoSink, write_buffer};
