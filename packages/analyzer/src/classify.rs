//! Pure classification predicates over a single lexeme's text.

use serde::{Deserialize, Serialize};

/// Built-in protobuf value types; `Unknown` marks a user-defined
/// message or enum reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
    Unknown,
}

/// Map a scalar type keyword to its `ScalarType`.
pub fn scalar_type_of(text: &str) -> ScalarType {
    match text {
        "double" => ScalarType::Double,
        "float" => ScalarType::Float,
        "int32" => ScalarType::Int32,
        "int64" => ScalarType::Int64,
        "uint32" => ScalarType::Uint32,
        "uint64" => ScalarType::Uint64,
        "sint32" => ScalarType::Sint32,
        "sint64" => ScalarType::Sint64,
        "fixed32" => ScalarType::Fixed32,
        "fixed64" => ScalarType::Fixed64,
        "sfixed32" => ScalarType::Sfixed32,
        "sfixed64" => ScalarType::Sfixed64,
        "bool" => ScalarType::Bool,
        "string" => ScalarType::String,
        "bytes" => ScalarType::Bytes,
        _ => ScalarType::Unknown,
    }
}

/// Identifier shape, anchored at the end of the text so leading junk the
/// splitter may have captured does not disqualify the trailing run.
pub fn is_identifier(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = bytes.len();
    while i > 0 && (bytes[i - 1].is_ascii_alphanumeric() || bytes[i - 1] == b'_') {
        i -= 1;
    }
    bytes[i..]
        .iter()
        .any(|b| b.is_ascii_alphabetic() || *b == b'_')
}

/// One of protobuf's field-cardinality qualifiers.
pub fn is_field_rule(text: &str) -> bool {
    matches!(text, "required" | "optional" | "repeated")
}

fn parse_unsigned(text: &str) -> Option<u64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else if text.starts_with(['-', '+']) {
        None
    } else {
        text.parse::<u64>().ok()
    }
}

/// Non-negative decimal or hex integer within the 32-bit unsigned range.
pub fn is_positive_int32(text: &str) -> bool {
    parse_unsigned(text).is_some_and(|value| value <= u32::MAX as u64)
}

/// Non-negative decimal or hex integer within the 64-bit unsigned range.
pub fn is_positive_int64(text: &str) -> bool {
    parse_unsigned(text).is_some()
}

/// Optionally signed decimal or hex integer within the 64-bit signed
/// range.
pub fn is_integer(text: &str) -> bool {
    let (negative, magnitude) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if let Some(hex) = magnitude
        .strip_prefix("0x")
        .or_else(|| magnitude.strip_prefix("0X"))
    {
        match u64::from_str_radix(hex, 16) {
            Ok(value) if negative => value <= i64::MAX as u64 + 1,
            Ok(value) => value <= i64::MAX as u64,
            Err(_) => false,
        }
    } else {
        text.parse::<i64>().is_ok()
    }
}

/// Floating-point shape: leading sign, digits, decimal point, exponent
/// marker with optional sign.
pub fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.parse::<f64>().is_ok()
}

pub fn is_boolean_literal(text: &str) -> bool {
    text == "true" || text == "false"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_shapes() {
        assert!(is_identifier("foo"));
        assert!(is_identifier("_bar"));
        assert!(is_identifier("Baz_99"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("123"));
        assert!(!is_identifier("-5"));
    }

    #[test]
    fn test_identifier_is_anchored_at_the_end() {
        // leading junk does not disqualify the trailing run
        assert!(is_identifier("9foo"));
        assert!(is_identifier("12a3"));
        assert!(!is_identifier("foo-"));
    }

    #[test]
    fn test_field_rules() {
        assert!(is_field_rule("required"));
        assert!(is_field_rule("optional"));
        assert!(is_field_rule("repeated"));
        assert!(!is_field_rule("Required"));
        assert!(!is_field_rule("message"));
    }

    #[test]
    fn test_scalar_type_mapping() {
        assert_eq!(scalar_type_of("int32"), ScalarType::Int32);
        assert_eq!(scalar_type_of("sfixed64"), ScalarType::Sfixed64);
        assert_eq!(scalar_type_of("bytes"), ScalarType::Bytes);
        assert_eq!(scalar_type_of("MyMessage"), ScalarType::Unknown);
        assert_eq!(scalar_type_of("Int32"), ScalarType::Unknown);
    }

    #[test]
    fn test_positive_int32_bounds() {
        assert!(is_positive_int32("0"));
        assert!(is_positive_int32("4294967295"));
        assert!(is_positive_int32("0x10"));
        assert!(is_positive_int32("0xFFFFFFFF"));
        assert!(!is_positive_int32("4294967296"));
        assert!(!is_positive_int32("0x100000000"));
        assert!(!is_positive_int32("-1"));
        assert!(!is_positive_int32("abc"));
        assert!(!is_positive_int32(""));
    }

    #[test]
    fn test_positive_int64_bounds() {
        assert!(is_positive_int64("18446744073709551615"));
        assert!(is_positive_int64("0xFFFFFFFFFFFFFFFF"));
        assert!(!is_positive_int64("18446744073709551616"));
        assert!(!is_positive_int64("-1"));
    }

    #[test]
    fn test_integer_bounds() {
        assert!(is_integer("0"));
        assert!(is_integer("-42"));
        assert!(is_integer("9223372036854775807"));
        assert!(is_integer("-9223372036854775808"));
        assert!(is_integer("0x7FFFFFFFFFFFFFFF"));
        assert!(is_integer("-0x8000000000000000"));
        assert!(!is_integer("9223372036854775808"));
        assert!(!is_integer("0x8000000000000000"));
        assert!(!is_integer("1.5"));
        assert!(!is_integer("0x"));
        assert!(!is_integer("-"));
    }

    #[test]
    fn test_numeric() {
        assert!(is_numeric("1"));
        assert!(is_numeric("-1.5"));
        assert!(is_numeric("1.2345E+3"));
        assert!(is_numeric("2e10"));
        assert!(!is_numeric("1.2345E+"));
        assert!(!is_numeric("abc"));
        assert!(!is_numeric(""));
    }

    #[test]
    fn test_boolean_literal() {
        assert!(is_boolean_literal("true"));
        assert!(is_boolean_literal("false"));
        assert!(!is_boolean_literal("True"));
        assert!(!is_boolean_literal("0"));
    }
}
