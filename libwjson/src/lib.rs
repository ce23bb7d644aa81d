//! JSON parser and serializer over UTF-16 character streams.
//!
//! Parsed documents become a [`Value`] tree whose strings are UTF-16 code unit
//! sequences and whose numbers keep the narrowest faithful representation:
//! 32-bit and 64-bit integers, exact [`Decimal`]s for fractions and huge
//! integers, and doubles for exponent literals.
//!
//! # Pipeline
//!
//! 1. **Source**: a [`CharSource`] hands out UTF-16 code units from a string,
//!    a UTF-16 buffer, or any UTF-8 reader.
//!
//! 2. **Parser**: a recursive-descent parser with one unit of lookahead
//!    builds the value and reports failures with their line and column.
//!
//! 3. **Encoder**: [`to_json`] renders a value back to compact JSON text.
//!
//! # Example
//!
//! ```
//! use libwjson::{parse, to_json, Value};
//!
//! let value = parse(r#"{"n": 2147483648, "x": 1.50}"#).unwrap();
//! assert_eq!(value.get("n"), Some(&Value::Int64(2147483648)));
//! assert_eq!(to_json(&value), r#"{"n":2147483648,"x":1.50}"#);
//! ```

mod decimal;
mod encode;
mod error;
mod limits;
mod parser;
mod source;
mod value;

pub use decimal::Decimal;
pub use encode::{to_json, to_json_text, to_json_with, write_json, NumberFormat};
pub use error::{ErrorKind, ParseError, Result};
pub use limits::{Limits, DEFAULT_MAX_DEPTH};
pub use parser::Parser;
pub use source::{CharSource, ReaderSource, StrSource, Utf16Source};
pub use value::{Map, Utf16String, Value};

use std::io::{BufReader, Read};

/// Parse a JSON document from a string.
pub fn parse(input: &str) -> Result<Value> {
    parse_source(StrSource::new(input), Limits::default())
}

/// Parse a JSON document from a string, enforcing the given limits.
pub fn parse_with_limits(input: &str, limits: Limits) -> Result<Value> {
    parse_source(StrSource::new(input), limits)
}

/// Parse a JSON document from UTF-16 code units.
pub fn parse_utf16(units: &[u16]) -> Result<Value> {
    parse_source(Utf16Source::new(units), Limits::default())
}

/// Parse a JSON document from a UTF-8 reader, consuming it to the end.
pub fn parse_reader<R: Read>(reader: R) -> Result<Value> {
    parse_source(ReaderSource::new(BufReader::new(reader)), Limits::default())
}

/// Parse a JSON document from any character source.
pub fn parse_source<S: CharSource>(source: S, limits: Limits) -> Result<Value> {
    Parser::new(source).with_limits(limits).parse()
}
