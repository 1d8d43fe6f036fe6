//! Query-string decoding shared by the listing routes.
//!
//! HTML forms submit every input, so an untouched filter arrives as `?form_id=`.
//! A blank value is treated the same as an absent one.

use serde::{de, Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

pub fn blank_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(blank_as_none::<D, bool>(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    #[derive(Debug, Deserialize)]
    struct Filters {
        #[serde(default, deserialize_with = "blank_as_none")]
        form_id: Option<i64>,
        #[serde(default, deserialize_with = "blank_as_false")]
        include_inactive: bool,
    }

    fn decode(uri: &str) -> Option<Filters> {
        let uri: Uri = uri.parse().unwrap();
        Query::<Filters>::try_from_uri(&uri).ok().map(|Query(f)| f)
    }

    #[test]
    fn blank_and_missing_values_are_absent() {
        for uri in ["/x", "/x?form_id=&include_inactive=", "/x?form_id=%20"] {
            let filters = decode(uri).unwrap();
            assert_eq!(filters.form_id, None, "{}", uri);
            assert!(!filters.include_inactive, "{}", uri);
        }
    }

    #[test]
    fn present_values_are_parsed() {
        let filters = decode("/x?form_id=7&include_inactive=true").unwrap();
        assert_eq!(filters.form_id, Some(7));
        assert!(filters.include_inactive);
    }

    #[test]
    fn garbage_is_still_an_error() {
        assert!(decode("/x?form_id=abc").is_none());
        assert!(decode("/x?include_inactive=maybe").is_none());
    }
}
