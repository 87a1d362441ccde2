//! Default-value validation against a field's declared scalar type.
//!
//! Invoked from the field-options production once `default =` has been
//! consumed. Numeric defaults are validated with the lexical predicates;
//! floating-point literals are reassembled from the several lexemes the
//! splitter broke them into.

use crate::classify::{
    is_boolean_literal, is_integer, is_numeric, is_positive_int32, is_positive_int64, ScalarType,
};
use crate::error::ParseResult;
use crate::lexer::LexemeKind;
use crate::parser::{FieldContext, Parser};
use crate::token::CodeKind;

impl<'src> Parser<'src> {
    pub(crate) fn parse_default_value(&mut self, context: &FieldContext) -> ParseResult<()> {
        match context.scalar_type {
            ScalarType::Int32
            | ScalarType::Int64
            | ScalarType::Sint32
            | ScalarType::Sint64
            | ScalarType::Sfixed32
            | ScalarType::Sfixed64 => self.parse_integer_default(is_integer, "an integer"),
            ScalarType::Uint32 | ScalarType::Fixed32 => {
                self.parse_integer_default(is_positive_int32, "an unsigned 32-bit integer")
            }
            ScalarType::Uint64 | ScalarType::Fixed64 => {
                self.parse_integer_default(is_positive_int64, "an unsigned 64-bit integer")
            }
            ScalarType::Float | ScalarType::Double => self.parse_float_default(),
            ScalarType::Bool => self.parse_bool_default(),
            ScalarType::String | ScalarType::Bytes => self.read_quoted_string("a default value"),
            ScalarType::Unknown => self.parse_enum_default(),
        }
    }

    fn parse_integer_default(
        &mut self,
        accepts: fn(&str) -> bool,
        expected: &str,
    ) -> ParseResult<()> {
        let value = self.expect_word(expected)?;
        if !accepts(value.text) {
            self.report(
                value.start,
                value.len(),
                format!("default value must be {}", expected),
            );
        }
        // invalid literals keep the Number classification
        self.push_token(CodeKind::Number, value);
        Ok(())
    }

    fn parse_bool_default(&mut self) -> ParseResult<()> {
        let value = self.expect_word("'true' or 'false'")?;
        if is_boolean_literal(value.text) {
            self.push_token(CodeKind::Keyword, value);
        } else {
            // the errant literal still classifies as a number
            self.report(
                value.start,
                value.len(),
                "default value must be 'true' or 'false'",
            );
            self.push_token(CodeKind::Number, value);
        }
        Ok(())
    }

    /// An enum-typed field: accept the following word as an enumerant
    /// with no literal validation.
    fn parse_enum_default(&mut self) -> ParseResult<()> {
        let value = self.expect_word("an enum value")?;
        self.push_token(CodeKind::Enumerant, value);
        Ok(())
    }

    /// Reassemble a floating-point literal.
    ///
    /// The splitter breaks `1.2345E+3` into `1` `.` `2345E` `+` `3`;
    /// this walks forward gluing mantissa, fraction and exponent tail
    /// back together, emits one Number token spanning the first through
    /// the last consumed lexeme, and validates the reconstructed text.
    fn parse_float_default(&mut self) -> ParseResult<()> {
        let first = self.expect_word("a numeric value")?;
        let mut text = String::from(first.text);
        let mut last_end = first.end();

        if let Some(dot) = self.peek() {
            if dot.kind == LexemeKind::Dot {
                text.push('.');
                last_end = dot.end();
                self.advance();
                if let Some(fraction) = self.peek() {
                    if fraction.kind == LexemeKind::Word {
                        text.push_str(fraction.text);
                        last_end = fraction.end();
                        self.advance();
                    }
                }
            }
        }

        // a trailing exponent marker picks up its sign and digits from
        // the following lexemes
        if text.ends_with('e') || text.ends_with('E') {
            match self.peek() {
                Some(sign) if sign.kind == LexemeKind::Plus => {
                    text.push('+');
                    last_end = sign.end();
                    self.advance();
                    if let Some(digits) = self.peek() {
                        if digits.kind == LexemeKind::Word {
                            text.push_str(digits.text);
                            last_end = digits.end();
                            self.advance();
                        }
                    }
                }
                Some(exponent)
                    if exponent.kind == LexemeKind::Word && exponent.text.starts_with('-') =>
                {
                    text.push_str(exponent.text);
                    last_end = exponent.end();
                    self.advance();
                }
                _ => {}
            }
        }

        let length = last_end - first.start;
        if !is_numeric(&text) {
            self.report(first.start, length, "invalid numeric value");
        }
        self.push_text_token(CodeKind::Number, first.start, length, text);
        Ok(())
    }
}
