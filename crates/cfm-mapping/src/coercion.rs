//! Coercion of element text to declared field types

use cfm_ir::Value;
use cfm_template::{FieldDescriptor, FieldType};

/// Coerce element text to the declared type of `field`
///
/// Decimals tolerate surrounding whitespace, integers do not; text (and
/// any unrecognized type) keeps the raw string unchanged.
///
/// # Errors
///
/// Returns [`crate::Error::TypeCoercion`] when the text is not a base-10
/// number of the declared kind.
pub fn coerce(field: &FieldDescriptor, text: &str) -> crate::Result<Value> {
    match &field.field_type {
        FieldType::FloatingPoint => parse_decimal(field, text).map(Value::Decimal),
        FieldType::Integer => parse_integer(field, text).map(Value::Integer),
        FieldType::Text | FieldType::Other(_) => Ok(Value::String(text.to_string())),
    }
}

fn parse_decimal(field: &FieldDescriptor, text: &str) -> crate::Result<f64> {
    let parsed = text.trim().parse::<f64>().map_err(|error| {
        crate::Error::type_coercion(&field.name, field.field_type.tag(), text, error.to_string())
    })?;

    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(crate::Error::type_coercion(
            &field.name,
            field.field_type.tag(),
            text,
            "value is not a finite number",
        ))
    }
}

fn parse_integer(field: &FieldDescriptor, text: &str) -> crate::Result<i64> {
    text.parse::<i64>().map_err(|error| {
        crate::Error::type_coercion(&field.name, field.field_type.tag(), text, error.to_string())
    })
}
