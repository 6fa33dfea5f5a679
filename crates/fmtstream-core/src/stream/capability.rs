//! Capability detection: native formattable kinds versus stream-insertable
//! values.
//!
//! Every formatted argument is classified once, at compile time, into an
//! [`Arg`]. Types the engine understands natively (text, numbers, and
//! enumerations registered with [`native_enum!`](crate::native_enum)) map to
//! a native variant through [`NativeArg`]. Types that only know how to write
//! themselves implement [`StreamInsert`] and map to [`Arg::Stream`].
//!
//! Precedence: when a type has both capabilities, the stream overload wins.
//! The selection is made by method resolution in the [`kind`] module, so
//! there is no runtime type inspection.

use std::fmt;
use std::io;

use super::ostream::OStream;

/// The generic streaming capability: append your own textual form to `os`.
///
/// Errors returned here reach the caller of the format call unchanged.
pub trait StreamInsert {
    fn stream_insert(&self, os: &mut OStream<'_>) -> io::Result<()>;
}

/// Conversion into one of the engine's native argument kinds.
pub trait NativeArg {
    fn native_arg(&self) -> Arg<'_>;
}

/// A classified format argument.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(&'a str),
    /// Rendered through [`StreamInsert`], then padded/truncated as text.
    Stream(&'a dyn StreamInsert),
}

impl<'a> Arg<'a> {
    /// Classify `value` through its native conversion.
    pub fn native<T: NativeArg + ?Sized>(value: &'a T) -> Arg<'a> {
        value.native_arg()
    }

    /// Classify `value` through its stream overload.
    pub fn stream<T: StreamInsert>(value: &'a T) -> Arg<'a> {
        Arg::Stream(value)
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Arg::Stream(_))
    }

    /// The value as a width/precision count, if it is a non-negative integer.
    pub fn as_count(&self) -> Option<usize> {
        match *self {
            Arg::Int(v) => usize::try_from(v).ok(),
            Arg::UInt(v) => usize::try_from(v).ok(),
            _ => None,
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Arg::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Arg::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Arg::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Arg::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Arg::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Arg::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Native conversions
// ---------------------------------------------------------------------------

/// Integer types an enumeration may use as its underlying representation.
pub trait IntegerArg: Copy {
    fn integer_arg(self) -> Arg<'static>;
}

macro_rules! signed_args {
    ($($ty:ty),*) => {$(
        impl IntegerArg for $ty {
            fn integer_arg(self) -> Arg<'static> {
                Arg::Int(self as i64)
            }
        }
        impl NativeArg for $ty {
            fn native_arg(&self) -> Arg<'_> {
                self.integer_arg()
            }
        }
    )*};
}

macro_rules! unsigned_args {
    ($($ty:ty),*) => {$(
        impl IntegerArg for $ty {
            fn integer_arg(self) -> Arg<'static> {
                Arg::UInt(self as u64)
            }
        }
        impl NativeArg for $ty {
            fn native_arg(&self) -> Arg<'_> {
                self.integer_arg()
            }
        }
    )*};
}

signed_args!(i8, i16, i32, i64, isize);
unsigned_args!(u8, u16, u32, u64, usize);

impl NativeArg for bool {
    fn native_arg(&self) -> Arg<'_> {
        Arg::Bool(*self)
    }
}

impl NativeArg for char {
    fn native_arg(&self) -> Arg<'_> {
        Arg::Char(*self)
    }
}

impl NativeArg for f32 {
    fn native_arg(&self) -> Arg<'_> {
        Arg::Float(f64::from(*self))
    }
}

impl NativeArg for f64 {
    fn native_arg(&self) -> Arg<'_> {
        Arg::Float(*self)
    }
}

impl NativeArg for str {
    fn native_arg(&self) -> Arg<'_> {
        Arg::Str(self)
    }
}

impl NativeArg for &str {
    fn native_arg(&self) -> Arg<'_> {
        Arg::Str(self)
    }
}

impl NativeArg for String {
    fn native_arg(&self) -> Arg<'_> {
        Arg::Str(self.as_str())
    }
}

/// Register fieldless `Copy` enumerations for native formatting through
/// their underlying integer: `native_enum!(Color: i32)` formats
/// `Color::Red` (discriminant 0) as `"0"`.
///
/// An enumeration that also implements [`StreamInsert`] is still formatted
/// through its stream overload.
#[macro_export]
macro_rules! native_enum {
    ($($ty:ty : $repr:ty),+ $(,)?) => {$(
        impl $crate::stream::NativeArg for $ty {
            fn native_arg(&self) -> $crate::stream::Arg<'_> {
                $crate::stream::IntegerArg::integer_arg(*self as $repr)
            }
        }
    )+};
}

// ---------------------------------------------------------------------------
// Compile-time selection
// ---------------------------------------------------------------------------

/// Kind selection for [`format_arg!`](crate::format_arg).
///
/// Both traits expose `format_arg`. Called on `&&value`, method resolution
/// tries `&&T` (matches [`StreamKind`] when `T: StreamInsert`) before
/// auto-dereferencing to `&T` (matches [`NativeKind`] when `T: NativeArg`),
/// so a stream overload shadows a native conversion.
pub mod kind {
    use super::{Arg, NativeArg, StreamInsert};

    pub trait StreamKind<'a> {
        fn format_arg(self) -> Arg<'a>;
    }

    impl<'a, T: StreamInsert> StreamKind<'a> for &&'a T {
        fn format_arg(self) -> Arg<'a> {
            Arg::Stream(*self)
        }
    }

    pub trait NativeKind<'a> {
        fn format_arg(self) -> Arg<'a>;
    }

    impl<'a, T: NativeArg + ?Sized> NativeKind<'a> for &'a T {
        fn format_arg(self) -> Arg<'a> {
            self.native_arg()
        }
    }
}

/// Classify a place expression (a variable, field or reference) as an
/// [`Arg`].
///
/// The argument is borrowed, so temporaries should be bound first; the
/// formatting macros take care of this for their own arguments.
#[macro_export]
macro_rules! format_arg {
    ($value:expr) => {
        match &&$value {
            value => {
                #[allow(unused_imports)]
                use $crate::stream::kind::{NativeKind as _, StreamKind as _};
                value.format_arg()
            }
        }
    };
}
