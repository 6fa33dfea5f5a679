//! Formatting for the engine's native argument kinds.
//!
//! Integers and floats get sign, alternate-form prefix, zero padding and
//! `=` alignment. Strings, characters and booleans-as-text go through the
//! same text path stream values use.
//!
//! Design invariant: numbers default to right alignment, text to left.

use crate::error::{FormatError, Result};
use crate::output::FormatBuffer;
use crate::spec::{Align, Count, FormatSpec, Sign};
use crate::stream::{Arg, apply_spec, write_padded};

/// Append a native argument formatted per `spec`.
///
/// `Arg::Stream` is not a native kind and is rejected; the dispatcher routes
/// it to the stream path.
pub fn format_native(arg: &Arg<'_>, spec: &FormatSpec, out: &mut FormatBuffer) -> Result<()> {
    spec.check_resolved()?;
    match *arg {
        Arg::Int(v) => format_integer(v < 0, v.unsigned_abs(), spec, out),
        Arg::UInt(v) => format_integer(false, v, spec, out),
        Arg::Float(v) => format_float(v, spec, out),
        Arg::Str(s) => {
            require_type(spec, b"s")?;
            apply_spec(s.as_bytes(), spec, out)
        }
        Arg::Char(c) if is_integer_type(spec.ty) => format_integer(false, u64::from(c), spec, out),
        Arg::Char(c) => {
            require_type(spec, b"c")?;
            let mut encoded = [0u8; 4];
            apply_spec(c.encode_utf8(&mut encoded).as_bytes(), spec, out)
        }
        Arg::Bool(b) if is_integer_type(spec.ty) => format_integer(false, u64::from(b), spec, out),
        Arg::Bool(b) => {
            require_type(spec, b"s")?;
            let text: &[u8] = if b { b"true" } else { b"false" };
            apply_spec(text, spec, out)
        }
        Arg::Stream(_) => Err(FormatError::Parse("invalid argument type")),
    }
}

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

fn format_integer(negative: bool, abs: u64, spec: &FormatSpec, out: &mut FormatBuffer) -> Result<()> {
    if spec.precision != Count::None {
        return Err(FormatError::Parse(
            "precision not allowed in integer format specifier",
        ));
    }
    let digits = match spec.ty {
        None | Some(b'd') => abs.to_string(),
        Some(b'x') => format!("{abs:x}"),
        Some(b'X') => format!("{abs:X}"),
        Some(b'o') => format!("{abs:o}"),
        Some(b'b' | b'B') => format!("{abs:b}"),
        Some(_) => return Err(FormatError::Parse("invalid type specifier")),
    };
    write_number(
        out,
        sign_byte(negative, spec.sign),
        alt_prefix(spec),
        digits.as_bytes(),
        spec,
    )
}

fn is_integer_type(ty: Option<u8>) -> bool {
    matches!(ty, Some(b'd' | b'x' | b'X' | b'o' | b'b' | b'B'))
}

fn alt_prefix(spec: &FormatSpec) -> &'static [u8] {
    if !spec.alt_form {
        return b"";
    }
    match spec.ty {
        Some(b'o') => b"0",
        Some(b'x') => b"0x",
        Some(b'X') => b"0X",
        Some(b'b') => b"0b",
        Some(b'B') => b"0B",
        _ => b"",
    }
}

fn sign_byte(negative: bool, sign: Sign) -> Option<u8> {
    if negative {
        Some(b'-')
    } else {
        match sign {
            Sign::Plus => Some(b'+'),
            Sign::Space => Some(b' '),
            Sign::Minus | Sign::None => None,
        }
    }
}

/// Emit sign, prefix and digits with width padding.
///
/// A `0` flag without explicit alignment pads with zeros between the
/// prefix and the digits, the same as `=` alignment with a `0` fill.
fn write_number(
    out: &mut FormatBuffer,
    sign: Option<u8>,
    prefix: &[u8],
    digits: &[u8],
    spec: &FormatSpec,
) -> Result<()> {
    let (fill, align) = if spec.zero_pad && spec.align == Align::None {
        (b'0', Align::Numeric)
    } else {
        (spec.fill, spec.align)
    };

    let content_len = usize::from(sign.is_some()) + prefix.len() + digits.len();
    let width = spec.min_width();

    if align == Align::Numeric {
        if let Some(s) = sign {
            out.push(s);
        }
        out.append(prefix);
        out.fill(fill, width.saturating_sub(content_len))?;
        out.append(digits);
        return Ok(());
    }

    let mut body = Vec::with_capacity(content_len);
    if let Some(s) = sign {
        body.push(s);
    }
    body.extend_from_slice(prefix);
    body.extend_from_slice(digits);

    let align = if align == Align::None {
        Align::Right
    } else {
        align
    };
    write_padded(out, &body, fill, align, width)
}

// ---------------------------------------------------------------------------
// Floats
// ---------------------------------------------------------------------------

fn format_float(value: f64, spec: &FormatSpec, out: &mut FormatBuffer) -> Result<()> {
    let conversion = match spec.ty {
        None => None,
        Some(ty @ (b'f' | b'F' | b'e' | b'E' | b'g' | b'G')) => Some(ty),
        Some(_) => return Err(FormatError::Parse("invalid type specifier")),
    };
    let uppercase = conversion.is_some_and(|c| c.is_ascii_uppercase());
    let negative = value.is_sign_negative() && !value.is_nan();
    let abs = value.abs();

    let body = if value.is_nan() {
        String::from(if uppercase { "NAN" } else { "nan" })
    } else if value.is_infinite() {
        String::from(if uppercase { "INF" } else { "inf" })
    } else {
        let precision = spec.max_precision();
        match conversion.map(|c| c | 0x20) {
            None => match precision {
                Some(p) => format_g(abs, p, false, spec.alt_form),
                None => format_shortest(abs),
            },
            Some(b'e') => format_e(abs, precision.unwrap_or(6), uppercase),
            Some(b'g') => format_g(abs, precision.unwrap_or(6), uppercase, spec.alt_form),
            _ => format_f(abs, precision.unwrap_or(6), spec.alt_form),
        }
    };

    write_number(out, sign_byte(negative, spec.sign), b"", body.as_bytes(), spec)
}

/// Shortest representation that round-trips.
fn format_shortest(value: f64) -> String {
    format!("{value}")
}

/// `f` formatting: fixed-point decimal.
fn format_f(value: f64, precision: usize, alt_form: bool) -> String {
    let text = format!("{value:.precision$}");
    if alt_form { with_point(text) } else { text }
}

/// `e` formatting: scientific notation with a signed two-digit exponent.
fn format_e(value: f64, precision: usize, uppercase: bool) -> String {
    let (mantissa, exp) = scientific(value, precision);
    with_exponent(&mantissa, exp, uppercase)
}

/// `g` formatting with `precision` significant digits.
///
/// Fixed notation is used while the rounded decimal exponent lies in
/// `-4..precision`, scientific otherwise. Without `#`, trailing fractional
/// zeros are dropped.
fn format_g(value: f64, precision: usize, uppercase: bool, alt_form: bool) -> String {
    let significant = i32::try_from(precision.max(1)).unwrap_or(i32::MAX);
    let (mantissa, exp) = scientific(value, (significant - 1) as usize);

    if (-4..significant).contains(&exp) {
        let frac_digits = (significant - 1 - exp) as usize;
        let text = format!("{value:.frac_digits$}");
        if alt_form {
            with_point(text)
        } else {
            trim_fraction(&text).to_string()
        }
    } else if alt_form {
        with_exponent(&with_point(mantissa), exp, uppercase)
    } else {
        with_exponent(trim_fraction(&mantissa), exp, uppercase)
    }
}

/// Round to `frac_digits` digits after the point in scientific form and
/// split the result into mantissa text and decimal exponent.
fn scientific(value: f64, frac_digits: usize) -> (String, i32) {
    let raw = format!("{value:.frac_digits$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

fn with_exponent(mantissa: &str, exp: i32, uppercase: bool) -> String {
    let marker = if uppercase { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{sign}{:02}", exp.unsigned_abs())
}

/// `#` form: the text always carries a decimal point.
fn with_point(mut text: String) -> String {
    if !text.contains('.') {
        text.push('.');
    }
    text
}

/// `1.2500` -> `1.25`, `3.000` -> `3`; integers are left alone.
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn require_type(spec: &FormatSpec, allowed: &[u8]) -> Result<()> {
    match spec.ty {
        None => Ok(()),
        Some(ty) if allowed.contains(&ty) => Ok(()),
        Some(_) => Err(FormatError::Parse("invalid type specifier")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
