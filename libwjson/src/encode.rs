//! Encode values as compact JSON text.
//!
//! Output never contains insignificant whitespace. Object members are written
//! in insertion order.

use crate::value::{Utf16String, Value};
use std::fmt::{self, Write};

/// How numeric variants are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// Floats are written as an integer mantissa with an exponent
    /// (`150.0` as `15e1`) so they read back as floats. Non-finite floats use
    /// the `NaN`, `Infinity` and `-Infinity` literals.
    #[default]
    RoundTrip,
    /// Floats use Rust's shortest `Display` text (`150.0` as `150`).
    /// Non-finite floats use the literals.
    Plain,
    /// Like `RoundTrip`, but non-finite floats become `null`, keeping the
    /// output within standard JSON.
    Strict,
}

/// String escapes, in application order.
///
/// Backslash comes first: run as successive whole-string substitutions, any
/// later entry's output would otherwise be escaped again. The encoder applies
/// the table in a single pass over the string, one character at a time.
const ESCAPES: [(char, &str); 8] = [
    ('\\', "\\\\"),
    ('"', "\\\""),
    ('/', "\\/"),
    ('\x08', "\\b"),
    ('\x0c', "\\f"),
    ('\r', "\\r"),
    ('\n', "\\n"),
    ('\t', "\\t"),
];

/// Encode a value with the default number format.
pub fn to_json(value: &Value) -> String {
    to_json_with(value, NumberFormat::default())
}

/// Encode a value with the given number format.
pub fn to_json_with(value: &Value, format: NumberFormat) -> String {
    let mut out = String::new();
    if write_json(&mut out, value, format).is_err() {
        unreachable!("writing into a String never fails");
    }
    out
}

/// Encode an optional value; `None` is written as `null`.
pub fn to_json_text(value: Option<&Value>, format: Option<NumberFormat>) -> String {
    let format = format.unwrap_or_default();
    match value {
        Some(value) => to_json_with(value, format),
        None => "null".to_string(),
    }
}

/// Write a value as JSON text into any formatter sink.
pub fn write_json<W: Write + ?Sized>(out: &mut W, value: &Value, format: NumberFormat) -> fmt::Result {
    match value {
        Value::Null => out.write_str("null"),
        Value::Bool(true) => out.write_str("true"),
        Value::Bool(false) => out.write_str("false"),
        Value::Int32(n) => write!(out, "{}", n),
        Value::Int64(n) => write!(out, "{}", n),
        Value::Decimal(d) => write!(out, "{}", d),
        Value::Float(f) => write_float(out, *f, format),
        Value::Str(s) => write_string(out, s),
        Value::Array(arr) => {
            out.write_char('[')?;
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_json(out, item, format)?;
            }
            out.write_char(']')
        }
        Value::Object(obj) => {
            out.write_char('{')?;
            for (i, (key, item)) in obj.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_string(out, key)?;
                out.write_char(':')?;
                write_json(out, item, format)?;
            }
            out.write_char('}')
        }
    }
}

/// Write a quoted, escaped string.
///
/// Surrogate pairs become the character they encode. An unpaired surrogate
/// has no UTF-8 form and is written as a `\uXXXX` escape.
fn write_string<W: Write + ?Sized>(out: &mut W, s: &Utf16String) -> fmt::Result {
    out.write_char('"')?;
    for decoded in char::decode_utf16(s.as_units().iter().copied()) {
        match decoded {
            Ok(c) => match escape_for(c) {
                Some(replacement) => out.write_str(replacement)?,
                None => out.write_char(c)?,
            },
            Err(e) => write!(out, "\\u{:04x}", e.unpaired_surrogate())?,
        }
    }
    out.write_char('"')
}

fn escape_for(c: char) -> Option<&'static str> {
    ESCAPES
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

fn write_float<W: Write + ?Sized>(out: &mut W, f: f64, format: NumberFormat) -> fmt::Result {
    if !f.is_finite() {
        if format == NumberFormat::Strict {
            return out.write_str("null");
        }
        let literal = if f.is_nan() {
            "NaN"
        } else if f > 0.0 {
            "Infinity"
        } else {
            "-Infinity"
        };
        return out.write_str(literal);
    }

    match format {
        NumberFormat::Plain => write!(out, "{}", f),
        NumberFormat::RoundTrip | NumberFormat::Strict => write_exponent_form(out, f),
    }
}

/// Shortest round-trip digits as `<integer>e<exponent>`.
///
/// The digits are the shortest that read back to the same double, so the
/// output round-trips bit for bit. Only the sink can fail.
fn write_exponent_form<W: Write + ?Sized>(out: &mut W, f: f64) -> fmt::Result {
    let sci = format!("{:e}", f);
    // `{:e}` always renders `<digits>e<exponent>` for finite values.
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    write!(out, "{}{}{}e{}", sign, whole, frac, exp - frac.len() as i32)
}
