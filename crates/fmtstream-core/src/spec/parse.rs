//! Brace-style format string parser.
//!
//! Grammar of a replacement field:
//!
//! ```text
//! '{' [index] [':' [[fill] align] [sign] ['#'] ['0'] [width] ['.' precision] [type]] '}'
//! width, precision := integer | '{' [index] '}'
//! ```
//!
//! `{{` and `}}` are escapes for literal braces. Automatic (`{}`) and manual
//! (`{0}`) argument indexing cannot be mixed in one format string.

use super::{Align, Count, FormatSpec, MAX_COUNT, Sign};
use crate::error::{FormatError, Result};

/// A piece of a parsed format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text to emit verbatim.
    Literal(&'a str),
    /// A replacement field bound to argument `index`.
    Field { index: usize, spec: FormatSpec },
}

// ---------------------------------------------------------------------------
// Argument indexing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexMode {
    Unset,
    Auto,
    Manual,
}

#[derive(Debug)]
struct ArgIndexer {
    next: usize,
    mode: IndexMode,
}

impl ArgIndexer {
    fn new() -> Self {
        Self {
            next: 0,
            mode: IndexMode::Unset,
        }
    }

    fn automatic(&mut self) -> Result<usize> {
        if self.mode == IndexMode::Manual {
            return Err(FormatError::Parse(
                "cannot switch from manual to automatic argument indexing",
            ));
        }
        self.mode = IndexMode::Auto;
        let index = self.next;
        self.next += 1;
        Ok(index)
    }

    fn manual(&mut self, index: usize) -> Result<usize> {
        if self.mode == IndexMode::Auto {
            return Err(FormatError::Parse(
                "cannot switch from automatic to manual argument indexing",
            ));
        }
        self.mode = IndexMode::Manual;
        Ok(index)
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Split a format string into literal runs and replacement fields.
pub fn parse_format_string(fmt: &str) -> Result<Vec<Segment<'_>>> {
    let bytes = fmt.as_bytes();
    let len = bytes.len();
    let mut segments = Vec::new();
    let mut indexer = ArgIndexer::new();
    let mut pos = 0;

    while pos < len {
        let start = pos;
        while pos < len && bytes[pos] != b'{' && bytes[pos] != b'}' {
            pos += 1;
        }
        if pos > start {
            segments.push(Segment::Literal(&fmt[start..pos]));
        }
        if pos >= len {
            break;
        }

        let brace = bytes[pos];
        pos += 1;
        if brace == b'}' {
            if pos < len && bytes[pos] == b'}' {
                segments.push(Segment::Literal(&fmt[pos..pos + 1]));
                pos += 1;
                continue;
            }
            return Err(FormatError::Parse("unmatched '}' in format string"));
        }
        if pos < len && bytes[pos] == b'{' {
            segments.push(Segment::Literal(&fmt[pos..pos + 1]));
            pos += 1;
            continue;
        }

        let (segment, consumed) = parse_field(&bytes[pos..], &mut indexer)?;
        segments.push(segment);
        pos += consumed;
    }
    Ok(segments)
}

/// Parse one replacement field. `field` starts right after the opening
/// brace; the returned count includes the closing brace.
fn parse_field(field: &[u8], indexer: &mut ArgIndexer) -> Result<(Segment<'static>, usize)> {
    let len = field.len();
    let mut pos = 0;

    let index = match field.first() {
        Some(b) if b.is_ascii_digit() => {
            let (value, consumed) = parse_decimal(field)?;
            pos += consumed;
            indexer.manual(value)?
        }
        Some(b':') | Some(b'}') => indexer.automatic()?,
        Some(_) => return Err(FormatError::Parse("invalid format string")),
        None => return Err(FormatError::Parse("missing '}' in format string")),
    };

    let mut spec = FormatSpec::default();
    if pos < len && field[pos] == b':' {
        pos += 1;
        let (parsed, consumed) = parse_spec(&field[pos..], indexer)?;
        spec = parsed;
        pos += consumed;
    }

    match field.get(pos) {
        Some(b'}') => Ok((Segment::Field { index, spec }, pos + 1)),
        Some(_) => Err(FormatError::Parse("invalid format specifier")),
        None => Err(FormatError::Parse("missing '}' in format string")),
    }
}

/// Parse the spec text after ':' up to (not including) the closing brace.
fn parse_spec(text: &[u8], indexer: &mut ArgIndexer) -> Result<(FormatSpec, usize)> {
    let len = text.len();
    let mut pos = 0;
    let mut spec = FormatSpec::default();

    // --- fill and alignment ---
    if let Some(&first) = text.first() {
        let fill_len = utf8_len(first);
        match text.get(fill_len).copied().and_then(Align::from_byte) {
            Some(align) if first != b'}' => {
                if fill_len != 1 || first == b'{' {
                    return Err(FormatError::Parse("invalid fill character"));
                }
                spec.fill = first;
                spec.align = align;
                pos = fill_len + 1;
            }
            _ => {
                if let Some(align) = Align::from_byte(first) {
                    spec.align = align;
                    pos = 1;
                }
            }
        }
    }

    // --- sign ---
    if pos < len {
        let sign = match text[pos] {
            b'+' => Sign::Plus,
            b'-' => Sign::Minus,
            b' ' => Sign::Space,
            _ => Sign::None,
        };
        if sign != Sign::None {
            spec.sign = sign;
            pos += 1;
        }
    }

    // --- alternate form ---
    if pos < len && text[pos] == b'#' {
        spec.alt_form = true;
        pos += 1;
    }

    // --- zero padding ---
    if pos < len && text[pos] == b'0' {
        spec.zero_pad = true;
        pos += 1;
    }

    // --- width ---
    if let Some((width, consumed)) = parse_count(&text[pos..], indexer)? {
        spec.width = width;
        pos += consumed;
    }

    // --- precision ---
    if pos < len && text[pos] == b'.' {
        pos += 1;
        match parse_count(&text[pos..], indexer)? {
            Some((precision, consumed)) => {
                spec.precision = precision;
                pos += consumed;
            }
            None => return Err(FormatError::Parse("missing precision specifier")),
        }
    }

    // --- presentation type ---
    if pos < len && text[pos] != b'}' {
        let ty = text[pos];
        if !(ty.is_ascii_alphabetic() || ty == b'?') {
            return Err(FormatError::Parse("invalid format specifier"));
        }
        spec.ty = Some(ty);
        pos += 1;
    }

    Ok((spec, pos))
}

/// Parse a literal integer or a nested `{index}` reference.
fn parse_count(text: &[u8], indexer: &mut ArgIndexer) -> Result<Option<(Count, usize)>> {
    match text.first() {
        Some(b) if b.is_ascii_digit() => {
            let (value, consumed) = parse_decimal(text)?;
            Ok(Some((Count::Fixed(value), consumed)))
        }
        Some(b'{') => {
            let inner = &text[1..];
            let (index, consumed) = match inner.first() {
                Some(b) if b.is_ascii_digit() => {
                    let (value, consumed) = parse_decimal(inner)?;
                    (indexer.manual(value)?, consumed)
                }
                Some(b'}') => (indexer.automatic()?, 0),
                _ => return Err(FormatError::Parse("invalid format string")),
            };
            if inner.get(consumed) != Some(&b'}') {
                return Err(FormatError::Parse("invalid format string"));
            }
            Ok(Some((Count::Arg(index), consumed + 2)))
        }
        _ => Ok(None),
    }
}

/// Parse the leading run of decimal digits in `text`, capped at
/// [`MAX_COUNT`].
fn parse_decimal(text: &[u8]) -> Result<(usize, usize)> {
    let mut value = 0_usize;
    let mut consumed = 0;
    for &d in text.iter().take_while(|b| b.is_ascii_digit()) {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(usize::from(d - b'0')))
            .filter(|&v| v <= MAX_COUNT)
            .ok_or(FormatError::Parse("number is too big"))?;
        consumed += 1;
    }
    Ok((value, consumed))
}

fn utf8_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
