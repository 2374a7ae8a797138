//! # Parameter Validation
//!
//! Checks a single argument value against the type declared by the catalog.
//!
//! | Declared type | Accepted values                      | Wire value            |
//! |---------------|--------------------------------------|-----------------------|
//! | `boolean`     | JSON booleans                        | `"true"` / `"false"`  |
//! | `integer`     | JSON numbers and numeric strings     | unchanged             |
//! | `string`      | JSON strings                         | unchanged             |
//! | anything else | anything                             | unchanged             |
use crate::catalog::ParamType;
use serde_json::Value;

/// A resolved argument does not match the type its parameter declares.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parameter '{param}' must be a {expected}, got {found}")]
pub struct TypeError {
    pub param: String,
    pub expected: ParamType,
    pub found: &'static str,
}

/// Validates `value` against `kind` and returns the value to put on the wire.
///
/// Booleans are normalized to the literal tokens `"true"` and `"false"` because the
/// transport only carries string fields. No other coercion happens.
///
/// # Returns
///
/// * `Ok(Value)` - The normalized value.
/// * `Err(TypeError)` - If the value does not match a known declared type.
pub fn validate(name: &str, value: Value, kind: &ParamType) -> Result<Value, TypeError> {
    let valid = match (kind, &value) {
        (ParamType::Boolean, Value::Bool(flag)) => {
            return Ok(Value::String(flag.to_string()));
        }
        (ParamType::Boolean, _) => false,
        (ParamType::Integer, Value::Number(_)) => true,
        (ParamType::Integer, Value::String(text)) => is_numeric(text),
        (ParamType::Integer, _) => false,
        (ParamType::String, Value::String(_)) => true,
        (ParamType::String, _) => false,
        (ParamType::Other(_), _) => true,
    };

    if valid {
        Ok(value)
    } else {
        Err(TypeError {
            param: name.to_string(),
            expected: kind.clone(),
            found: json_type_name(&value),
        })
    }
}

/// Whether `text` reads as a number: optional surrounding whitespace, an optional sign,
/// decimal digits with an optional fraction, and an optional exponent.
fn is_numeric(text: &str) -> bool {
    let text = text.trim_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };
    let (integral, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if integral.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(integral) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exponent) => {
            let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            !exponent.is_empty() && all_digits(exponent)
        }
    }
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
