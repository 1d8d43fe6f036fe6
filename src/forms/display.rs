use super::field_spec::FieldSpec;
use super::projection::FieldValues;

const NAME_HINT: &str = "name";

/// Derive a human readable label for a record.
///
/// An explicit `display_field` on the template wins when it holds a value. Otherwise the
/// first non-empty value whose field name contains "name" (any case) is used, scanning
/// the template's declared fields first and then any keys left over from an older
/// version of the template. Records with nothing name-like fall back to
/// `Employee #<id>`.
pub fn display_name(
    id: i64,
    fields: &[FieldSpec],
    display_field: Option<&str>,
    values: &FieldValues,
) -> String {
    if let Some(value) = display_field.and_then(|key| non_empty(values, key)) {
        return value.to_string();
    }

    let declared = fields.iter().map(|f| f.name.as_str());
    let leftover = values
        .keys()
        .map(String::as_str)
        .filter(|key| !fields.iter().any(|f| f.name == *key));

    declared
        .chain(leftover)
        .filter(|key| key.to_lowercase().contains(NAME_HINT))
        .find_map(|key| non_empty(values, key))
        .map(str::to_string)
        .unwrap_or_else(|| fallback_name(id))
}

pub fn fallback_name(id: i64) -> String {
    format!("Employee #{}", id)
}

fn non_empty<'a>(values: &'a FieldValues, key: &str) -> Option<&'a str> {
    values.get(key).map(String::as_str).filter(|v| !v.is_empty())
}
