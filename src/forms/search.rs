use super::projection::FieldValues;

/// Case-insensitive substring match over a record's field names and values, or the name
/// of the template it belongs to. A blank query matches everything.
///
/// Each key and value is matched on its own, so a query never spans JSON punctuation.
/// `PgStore` applies the same rule through `jsonb_each_text`.
pub fn matches_query(query: &str, values: &FieldValues, template_name: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    if template_name.to_lowercase().contains(&needle) {
        return true;
    }

    values.iter().any(|(key, value)| {
        key.to_lowercase().contains(&needle) || value.to_lowercase().contains(&needle)
    })
}

/// Escape LIKE wildcards so a query is matched literally by `ILIKE`
pub fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
