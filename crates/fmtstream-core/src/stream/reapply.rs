//! Format-spec reapplier.
//!
//! Takes the raw text a value rendered and applies the text half of the spec
//! language to it: precision truncation, minimum width, fill and alignment.
//! Numeric-only flags are rejected up front, whatever the text looks like.
//!
//! All lengths are raw byte counts.

use log::trace;

use super::capability::StreamInsert;
use super::ostream::render;
use crate::error::{FormatError, Result};
use crate::output::FormatBuffer;
use crate::spec::{Align, FormatSpec, Sign};

/// Reject spec flags that only make sense for numbers.
///
/// Checked in the order the flags appear in a spec: `=` alignment, sign,
/// `#`, then `0`.
pub fn check_non_numeric(spec: &FormatSpec) -> Result<()> {
    let flag = if spec.align == Align::Numeric {
        Some('=')
    } else {
        match spec.sign {
            Sign::Plus => Some('+'),
            Sign::Minus => Some('-'),
            Sign::Space => Some(' '),
            Sign::None if spec.alt_form => Some('#'),
            Sign::None if spec.zero_pad => Some('0'),
            Sign::None => None,
        }
    };
    match flag {
        Some(flag) => {
            trace!("rejecting numeric-only flag '{flag}' for text value");
            Err(FormatError::RequiresNumeric(flag))
        }
        None => Ok(()),
    }
}

/// Append `text` to `out` padded to `width` with `fill`.
///
/// `Align::None` is treated as left. Center alignment puts the floor half of
/// the padding before the text and the rest after it. Nothing is appended
/// if the padded field cannot be allocated.
pub fn write_padded(
    out: &mut FormatBuffer,
    text: &[u8],
    fill: u8,
    align: Align,
    width: usize,
) -> Result<()> {
    let padding = width.saturating_sub(text.len());
    let (before, after) = match align {
        Align::Right => (padding, 0),
        Align::Center => (padding / 2, padding - padding / 2),
        Align::Left | Align::None | Align::Numeric => (0, padding),
    };
    out.reserve(padding.saturating_add(text.len()))?;
    out.fill(fill, before)?;
    out.append(text);
    out.fill(fill, after)
}

/// Apply `spec` to already rendered `raw` text and append the result.
///
/// `spec` must already be resolved: a width or precision still taken from
/// another argument is rejected, as is a count above
/// [`MAX_COUNT`](crate::spec::MAX_COUNT). Nothing
/// is appended when the spec is rejected.
pub fn apply_spec(raw: &[u8], spec: &FormatSpec, out: &mut FormatBuffer) -> Result<()> {
    check_non_numeric(spec)?;
    spec.check_resolved()?;

    let text = match spec.max_precision() {
        Some(precision) => &raw[..raw.len().min(precision)],
        None => raw,
    };
    write_padded(out, text, spec.fill, spec.align, spec.min_width())
}

/// Render a stream-insertable value and append it, formatted per `spec`.
///
/// This is the render-and-pad entry point used by the dispatcher. Output
/// for this value is appended only once both rendering and spec
/// application have succeeded.
pub fn format_stream_value<T: StreamInsert + ?Sized>(
    value: &T,
    spec: &FormatSpec,
    out: &mut FormatBuffer,
) -> Result<()> {
    let raw = render(value).map_err(FormatError::Render)?;
    apply_spec(raw.as_bytes(), spec, out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Count, MAX_COUNT};
    use crate::stream::OStream;
    use std::io;

    fn applied(raw: &str, spec: FormatSpec) -> String {
        let mut out = FormatBuffer::new();
        apply_spec(raw.as_bytes(), &spec, &mut out).unwrap();
        out.into_string()
    }

    fn rejected(spec: FormatSpec) -> String {
        let mut out = FormatBuffer::new();
        let err = apply_spec(b"def", &spec, &mut out).unwrap_err();
        assert!(out.is_empty());
        err.to_string()
    }

    #[test]
    fn test_no_spec_is_identity() {
        assert_eq!(applied("def", FormatSpec::new()), "def");
        assert_eq!(applied("", FormatSpec::new()), "");
    }

    #[test]
    fn test_alignment() {
        let base = FormatSpec::new().with_width(5);
        assert_eq!(applied("def", base.with_align(Align::Left)), "def  ");
        assert_eq!(applied("def", base.with_align(Align::Right)), "  def");
        assert_eq!(applied("def", base.with_align(Align::Center)), " def ");
        assert_eq!(applied("def", base), "def  ");
    }

    #[test]
    fn test_center_puts_extra_unit_after() {
        let spec = FormatSpec::new().with_width(6).with_align(Align::Center);
        assert_eq!(applied("def", spec), " def  ");
    }

    #[test]
    fn test_custom_fill() {
        let spec = FormatSpec::new()
            .with_fill(b'*')
            .with_align(Align::Left)
            .with_width(5);
        assert_eq!(applied("def", spec), "def**");
    }

    #[test]
    fn test_precision_truncates_bytes() {
        assert_eq!(applied("test", FormatSpec::new().with_precision(2)), "te");
        assert_eq!(applied("te", FormatSpec::new().with_precision(9)), "te");
        assert_eq!(applied("test", FormatSpec::new().with_precision(0)), "");
    }

    #[test]
    fn test_width_measured_after_truncation() {
        let spec = FormatSpec::new()
            .with_precision(2)
            .with_width(4)
            .with_align(Align::Right);
        assert_eq!(applied("test", spec), "  te");
    }

    #[test]
    fn test_width_smaller_than_text_does_not_truncate() {
        assert_eq!(applied("test", FormatSpec::new().with_width(2)), "test");
    }

    #[test]
    fn test_empty_text_padded_to_width() {
        assert_eq!(applied("", FormatSpec::new().with_width(3)), "   ");
    }

    #[test]
    fn test_numeric_flags_rejected() {
        let numeric = |flag: char| format!("format specifier '{flag}' requires numeric argument");
        assert_eq!(rejected(FormatSpec::new().with_sign(Sign::Plus)), numeric('+'));
        assert_eq!(rejected(FormatSpec::new().with_sign(Sign::Minus)), numeric('-'));
        assert_eq!(rejected(FormatSpec::new().with_sign(Sign::Space)), numeric(' '));
        assert_eq!(rejected(FormatSpec::new().with_alt_form()), numeric('#'));
        assert_eq!(
            rejected(FormatSpec::new().with_zero_pad().with_width(5)),
            numeric('0')
        );
        assert_eq!(
            rejected(FormatSpec::new().with_align(Align::Numeric).with_width(5)),
            numeric('=')
        );
    }

    #[test]
    fn test_unresolved_count_rejected() {
        let spec = FormatSpec {
            width: Count::Arg(1),
            ..FormatSpec::default()
        };
        assert_eq!(
            rejected(spec),
            "width/precision must be resolved before formatting"
        );
        let spec = FormatSpec {
            precision: Count::Arg(1),
            ..FormatSpec::default()
        };
        assert_eq!(
            rejected(spec),
            "width/precision must be resolved before formatting"
        );
    }

    #[test]
    fn test_oversized_width_rejected_without_output() {
        assert_eq!(
            rejected(FormatSpec::new().with_width(usize::MAX)),
            "number is too big"
        );
        assert_eq!(
            rejected(FormatSpec::new().with_width(MAX_COUNT + 1)),
            "number is too big"
        );
    }

    #[test]
    fn test_write_padded_reports_unallocatable_width() {
        let mut out = FormatBuffer::from("ab");
        let err = write_padded(&mut out, b"x", b' ', Align::Right, usize::MAX).unwrap_err();
        assert!(matches!(err, FormatError::Capacity(_)));
        assert_eq!(out.as_bytes(), b"ab");
    }

    #[test]
    fn test_numeric_check_ignores_text_content() {
        let mut out = FormatBuffer::new();
        let spec = FormatSpec::new().with_sign(Sign::Plus);
        assert!(apply_spec(b"42", &spec, &mut out).is_err());
    }

    struct Failing;

    impl StreamInsert for Failing {
        fn stream_insert(&self, os: &mut OStream<'_>) -> io::Result<()> {
            os.write_bytes(b"leak")?;
            Err(io::Error::other("render failed"))
        }
    }

    #[test]
    fn test_render_failure_leaves_output_untouched() {
        let mut out = FormatBuffer::from("prior ");
        let err = format_stream_value(&Failing, &FormatSpec::new(), &mut out).unwrap_err();
        assert!(matches!(err, FormatError::Render(_)));
        assert_eq!(err.to_string(), "render failed");
        assert_eq!(out.as_bytes(), b"prior ");
    }
}
