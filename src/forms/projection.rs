use serde_json::Value;
use std::collections::BTreeMap;

use super::error::FieldConfigError;
use super::field_spec::FieldSpec;

/// Stored field values of a record, keyed by field name
pub type FieldValues = BTreeMap<String, String>;

/// Coerce a submitted JSON payload into plain string values.
///
/// Strings pass through, numbers and booleans are rendered as text and `null` becomes
/// an empty string. Nested arrays or objects have no place in a flat template.
pub fn coerce_raw_values(payload: &Value) -> Result<FieldValues, FieldConfigError> {
    let object = match payload {
        Value::Object(map) => map,
        Value::Null => return Ok(FieldValues::new()),
        _ => return Err(FieldConfigError::ValuesNotAMapping),
    };

    object
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(FieldConfigError::UnsupportedValue(key.clone()))
                }
            };
            Ok((key.clone(), text))
        })
        .collect()
}

/// Reshape raw values to exactly the template's current field set.
///
/// Every declared field gets an entry (empty when not submitted); anything else in
/// `raw` is dropped.
pub fn project(fields: &[FieldSpec], raw: &FieldValues) -> FieldValues {
    fields
        .iter()
        .map(|field| {
            let value = raw.get(&field.name).cloned().unwrap_or_default();
            (field.name.clone(), value)
        })
        .collect()
}
