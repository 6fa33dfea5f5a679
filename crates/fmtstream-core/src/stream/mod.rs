//! Stream-insertable values: capability detection, rendering through the
//! value's own overload, and reapplying the format spec to the result.

pub mod capability;
pub mod ostream;
pub mod reapply;

pub use capability::{Arg, IntegerArg, NativeArg, StreamInsert, kind};
pub use ostream::{OStream, render};
pub use reapply::{apply_spec, check_non_numeric, format_stream_value, write_padded};
