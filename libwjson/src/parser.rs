//! Recursive-descent JSON parser over a UTF-16 character source.
//!
//! The parser holds one code unit of lookahead. Peeking is repeatable and
//! free of side effects; consuming a unit advances the 0-based line and
//! column (a line feed moves to the next line and resets the column).
//!
//! Beyond standard JSON the grammar accepts the bare literals `Infinity`,
//! `-Infinity` and `NaN`, and duplicate object keys (last write wins, the key
//! keeps its first position).
//!
//! Numbers take the narrowest faithful representation:
//! - no fraction or exponent: `Int32`, else `Int64`, else `Decimal`
//! - a fraction but no exponent: `Decimal`, exact digit by digit
//! - an exponent: `Float`, the double nearest to `mantissa * 10^exp`

use crate::decimal::Decimal;
use crate::error::{unit_char, ErrorKind, ParseError, Result};
use crate::limits::Limits;
use crate::source::CharSource;
use crate::value::{Map, Utf16String, Value};
use log::{debug, trace};

const QUOTE: u16 = b'"' as u16;
const BACKSLASH: u16 = b'\\' as u16;
const LINE_FEED: u16 = b'\n' as u16;

/// Parser state for a single document.
pub struct Parser<S> {
    source: S,
    /// `Some(None)` once end of input has been seen.
    peeked: Option<Option<u16>>,
    line: usize,
    column: usize,
    fetched: u64,
    depth: u64,
    limits: Limits,
}

impl<S: CharSource> Parser<S> {
    /// Create a parser over `source` with the default [`Limits`].
    pub fn new(source: S) -> Self {
        Self {
            source,
            peeked: None,
            line: 0,
            column: 0,
            fetched: 0,
            depth: 0,
            limits: Limits::default(),
        }
    }

    /// Replace the limits checked while parsing.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Parse one value and require that only whitespace follows it.
    pub fn parse(mut self) -> Result<Value> {
        trace!("parsing document");
        let result = self.parse_document();
        match &result {
            Ok(_) => trace!("parsed document of {} code units", self.fetched),
            Err(e) => debug!("parse failed: {}", e),
        }
        result
    }

    fn parse_document(&mut self) -> Result<Value> {
        let value = self.parse_value()?;
        self.skip_whitespace()?;
        match self.peek()? {
            None => Ok(value),
            Some(_) => Err(self.error(ErrorKind::TrailingData)),
        }
    }

    /// Current 0-based line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current 0-based column.
    pub fn column(&self) -> usize {
        self.column
    }

    fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.line, self.column)
    }

    // -------------------------------------------------------------------------
    // Cursor
    // -------------------------------------------------------------------------

    fn peek(&mut self) -> Result<Option<u16>> {
        if let Some(unit) = self.peeked {
            return Ok(unit);
        }

        let unit = self
            .source
            .next_unit()
            .map_err(|e| self.error(ErrorKind::Io(e)))?;
        if unit.is_some() {
            self.fetched += 1;
            if !self.limits.allows_units(self.fetched) {
                let max = self.limits.max_input_units.unwrap_or_default();
                debug!("input rejected after {} code units", max);
                return Err(self.error(ErrorKind::InputTooLarge(max)));
            }
        }
        self.peeked = Some(unit);
        Ok(unit)
    }

    fn consume(&mut self) -> Result<Option<u16>> {
        let unit = self.peek()?;
        match unit {
            Some(LINE_FEED) => {
                self.line += 1;
                self.column = 0;
            }
            Some(_) => self.column += 1,
            None => return Ok(None),
        }
        self.peeked = None;
        Ok(unit)
    }

    fn peek_char(&mut self) -> Result<Option<char>> {
        Ok(self.peek()?.map(unit_char))
    }

    fn peek_digit(&mut self) -> Result<Option<u32>> {
        Ok(self.peek_char()?.and_then(|c| c.to_digit(10)))
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek_char()? {
            self.consume()?;
        }
        Ok(())
    }

    /// Consume `expected` or fail without consuming.
    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek_char()? {
            Some(c) if c == expected => {
                self.consume()?;
                Ok(())
            }
            Some(c) => Err(self.error(ErrorKind::ExpectedToken {
                expected: format!("'{}'", expected),
                found: c,
            })),
            None => Err(self.error(ErrorKind::IncompleteInput)),
        }
    }

    /// Consume a keyword character by character.
    fn expect_keyword(&mut self, word: &str) -> Result<()> {
        for expected in word.chars() {
            match self.peek_char()? {
                Some(c) if c == expected => {
                    self.consume()?;
                }
                Some(c) => {
                    return Err(self.error(ErrorKind::ExpectedToken {
                        expected: format!("'{}'", word),
                        found: c,
                    }))
                }
                None => return Err(self.error(ErrorKind::IncompleteInput)),
            }
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if !self.limits.allows_depth(self.depth) {
            let max = self.limits.max_depth.unwrap_or_default();
            debug!("input rejected at nesting depth {}", self.depth);
            return Err(self.error(ErrorKind::NestingTooDeep(max)));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // -------------------------------------------------------------------------
    // Productions
    // -------------------------------------------------------------------------

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace()?;
        let c = match self.peek_char()? {
            Some(c) => c,
            None => return Err(self.error(ErrorKind::IncompleteInput)),
        };

        match c {
            '[' => self.parse_array(),
            '{' => self.parse_object(),
            't' => {
                self.expect_keyword("true")?;
                Ok(Value::Bool(true))
            }
            'f' => {
                self.expect_keyword("false")?;
                Ok(Value::Bool(false))
            }
            'n' => {
                self.expect_keyword("null")?;
                Ok(Value::Null)
            }
            '"' => Ok(Value::Str(self.parse_string()?)),
            '-' | '0'..='9' | 'I' | 'N' => self.parse_number(),
            c => Err(self.error(ErrorKind::UnexpectedCharacter(c))),
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;
        self.consume()?; // [
        let mut items = Vec::new();

        self.skip_whitespace()?;
        if self.peek_char()? == Some(']') {
            self.consume()?;
            self.leave();
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);
            self.skip_whitespace()?;
            if self.peek_char()? != Some(',') {
                break;
            }
            self.consume()?;
        }

        if self.peek_char()? != Some(']') {
            return Err(self.error(ErrorKind::UnterminatedArray));
        }
        self.consume()?;
        self.leave();
        Ok(Value::Array(items))
    }

    /// Unlike arrays, the member loop checks for `}` before each key. Reached
    /// after a comma, that exit leaves the `}` unconsumed, so a trailing
    /// comma surfaces as an error at the brace from whatever follows the
    /// object.
    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        self.consume()?; // {
        let mut members = Map::new();

        self.skip_whitespace()?;
        if self.peek_char()? == Some('}') {
            self.consume()?;
            self.leave();
            return Ok(Value::Object(members));
        }

        loop {
            self.skip_whitespace()?;
            if self.peek_char()? == Some('}') {
                break;
            }

            let key = self.parse_string()?;
            self.skip_whitespace()?;
            self.expect_char(':')?;
            let value = self.parse_value()?;
            // Duplicate keys: last write wins, first position kept.
            members.insert(key, value);

            self.skip_whitespace()?;
            match self.peek_char()? {
                Some(',') => {
                    self.consume()?;
                }
                Some('}') => {
                    self.consume()?;
                    break;
                }
                Some(c) => {
                    return Err(self.error(ErrorKind::ExpectedToken {
                        expected: "',' or '}'".to_string(),
                        found: c,
                    }))
                }
                None => return Err(self.error(ErrorKind::IncompleteInput)),
            }
        }

        self.leave();
        Ok(Value::Object(members))
    }

    fn parse_string(&mut self) -> Result<Utf16String> {
        self.expect_char('"')?;
        let mut out = Utf16String::new();

        loop {
            let unit = match self.consume()? {
                Some(unit) => unit,
                None => return Err(self.error(ErrorKind::UnterminatedString)),
            };
            if unit == QUOTE {
                return Ok(out);
            }
            if unit != BACKSLASH {
                out.push(unit);
                continue;
            }

            let escaped = match self.consume()? {
                Some(unit) => unit_char(unit),
                None => return Err(self.error(ErrorKind::IncompleteEscape)),
            };
            let decoded = match escaped {
                '"' | '\\' | '/' => escaped as u16,
                'b' => 0x08,
                'f' => 0x0c,
                'r' => b'\r' as u16,
                'n' => LINE_FEED,
                't' => b'\t' as u16,
                'u' => self.parse_unicode_escape()?,
                c => return Err(self.error(ErrorKind::InvalidEscape(c))),
            };
            out.push(decoded);
        }
    }

    /// Four hex digits after `\u`, as one raw code unit.
    fn parse_unicode_escape(&mut self) -> Result<u16> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let c = match self.consume()? {
                Some(u) => unit_char(u),
                None => return Err(self.error(ErrorKind::IncompleteEscape)),
            };
            let digit = c
                .to_digit(16)
                .ok_or_else(|| self.error(ErrorKind::InvalidEscape(c)))?;
            unit = (unit << 4) | digit as u16;
        }
        Ok(unit)
    }

    fn parse_number(&mut self) -> Result<Value> {
        let negative = self.peek_char()? == Some('-');
        if negative {
            self.consume()?;
            match self.peek_char()? {
                Some('0'..='9' | 'I' | 'N') => {}
                Some(_) => return Err(self.error(ErrorKind::InvalidNumber)),
                None => return Err(self.error(ErrorKind::IncompleteInput)),
            }
        }

        match self.peek_char()? {
            Some('I') => {
                self.expect_keyword("Infinity")?;
                let inf = if negative {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                };
                return Ok(Value::Float(inf));
            }
            Some('N') => {
                self.expect_keyword("NaN")?;
                return Ok(Value::Float(f64::NAN));
            }
            _ => {}
        }

        // Leading zeros are not rejected.
        let mut number = Decimal::default();
        while let Some(digit) = self.peek_digit()? {
            number.push_digit(digit);
            self.consume()?;
        }

        let has_fraction = self.peek_char()? == Some('.');
        if has_fraction {
            self.consume()?;
            let mut digits = 0;
            while let Some(digit) = self.peek_digit()? {
                number.push_fraction_digit(digit);
                self.consume()?;
                digits += 1;
            }
            if digits == 0 {
                return Err(self.error(ErrorKind::InvalidNumber));
            }
        }

        if negative {
            number.negate();
        }

        if !matches!(self.peek_char()?, Some('e' | 'E')) {
            if !has_fraction {
                if let Some(n) = number.to_i32() {
                    return Ok(Value::Int32(n));
                }
                if let Some(n) = number.to_i64() {
                    return Ok(Value::Int64(n));
                }
            }
            return Ok(Value::Decimal(number));
        }

        self.consume()?; // e
        let negative_exp = match self.peek_char()? {
            Some('-') => {
                self.consume()?;
                true
            }
            Some('+') => {
                self.consume()?;
                false
            }
            _ => false,
        };

        let mut exp: i32 = 0;
        let mut digits = 0;
        while let Some(digit) = self.peek_digit()? {
            exp = exp.saturating_mul(10).saturating_add(digit as i32);
            self.consume()?;
            digits += 1;
        }
        if digits == 0 {
            return Err(self.error(ErrorKind::IncompleteExponent));
        }

        if number.is_zero() {
            return Ok(Value::Float(if negative { -0.0 } else { 0.0 }));
        }
        let exp = if negative_exp { -exp } else { exp };
        // The digits were checked above, so the standard float parser only
        // has to do the correctly rounded scaling.
        format!("{}e{}", number, exp)
            .parse()
            .map(Value::Float)
            .map_err(|_| self.error(ErrorKind::InvalidNumber))
    }
}
