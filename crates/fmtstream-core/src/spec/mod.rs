//! Parsed format-spec value types.
//!
//! A [`FormatSpec`] describes fill, alignment, sign, alternate form, zero
//! padding, minimum width and maximum precision for one replacement field.
//! It is produced by the parser, resolved against the argument list, and
//! then passed by reference to the formatters, which never mutate it.

pub mod parse;

pub use parse::{Segment, parse_format_string};

use crate::error::{FormatError, Result};

/// Largest width, precision or argument index accepted anywhere.
pub const MAX_COUNT: usize = i32::MAX as usize;

// ---------------------------------------------------------------------------
// Spec components
// ---------------------------------------------------------------------------

/// Field alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    /// No alignment given: the value's natural alignment applies.
    #[default]
    None,
    Left,   // '<'
    Right,  // '>'
    Center, // '^'
    /// Padding between sign and digits; numbers only.
    Numeric, // '='
}

impl Align {
    pub fn from_byte(byte: u8) -> Option<Align> {
        match byte {
            b'<' => Some(Align::Left),
            b'>' => Some(Align::Right),
            b'^' => Some(Align::Center),
            b'=' => Some(Align::Numeric),
            _ => None,
        }
    }
}

/// Sign flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sign {
    #[default]
    None,
    Plus,  // '+'
    Minus, // '-'
    Space, // ' '
}

/// Width or precision, possibly taken from another argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Count {
    #[default]
    None,
    Fixed(usize),
    /// `{n}`: the value of argument `n`.
    Arg(usize),
}

impl Count {
    /// The fixed value, if resolved.
    pub fn fixed(self) -> Option<usize> {
        match self {
            Count::Fixed(n) => Some(n),
            _ => None,
        }
    }
}

/// A parsed replacement-field spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: u8,
    pub align: Align,
    pub sign: Sign,
    pub alt_form: bool,
    pub zero_pad: bool,
    pub width: Count,
    pub precision: Count,
    /// Presentation type character, if any.
    pub ty: Option<u8>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: b' ',
            align: Align::None,
            sign: Sign::None,
            alt_form: false,
            zero_pad: false,
            width: Count::None,
            precision: Count::None,
            ty: None,
        }
    }
}

impl FormatSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: u8) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_sign(mut self, sign: Sign) -> Self {
        self.sign = sign;
        self
    }

    pub fn with_alt_form(mut self) -> Self {
        self.alt_form = true;
        self
    }

    pub fn with_zero_pad(mut self) -> Self {
        self.zero_pad = true;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Count::Fixed(width);
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Count::Fixed(precision);
        self
    }

    /// Minimum field width; 0 when absent or unresolved.
    pub fn min_width(&self) -> usize {
        self.width.fixed().unwrap_or(0)
    }

    /// Maximum precision, if given.
    pub fn max_precision(&self) -> Option<usize> {
        self.precision.fixed()
    }

    /// Whether any width or precision still refers to an argument.
    pub fn is_dynamic(&self) -> bool {
        matches!(self.width, Count::Arg(_)) || matches!(self.precision, Count::Arg(_))
    }

    /// Ensure width and precision are fixed values no larger than
    /// [`MAX_COUNT`], as formatters require.
    pub fn check_resolved(&self) -> Result<()> {
        if self.is_dynamic() {
            return Err(FormatError::Parse(
                "width/precision must be resolved before formatting",
            ));
        }
        let too_big = |count: Count| count.fixed().is_some_and(|n| n > MAX_COUNT);
        if too_big(self.width) || too_big(self.precision) {
            return Err(FormatError::Parse("number is too big"));
        }
        Ok(())
    }
}
