use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

use super::error::FieldConfigError;

/// Input types a form field can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Email,
    Date,
    Password,
    Textarea,
    Tel,
    Url,
}

impl FieldType {
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Email,
        FieldType::Date,
        FieldType::Password,
        FieldType::Textarea,
        FieldType::Tel,
        FieldType::Url,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Date => "date",
            FieldType::Password => "password",
            FieldType::Textarea => "textarea",
            FieldType::Tel => "tel",
            FieldType::Url => "url",
        }
    }

    /// Human readable label shown in form builders
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Number => "Number",
            FieldType::Email => "Email",
            FieldType::Date => "Date",
            FieldType::Password => "Password",
            FieldType::Textarea => "Text Area",
            FieldType::Tel => "Phone Number",
            FieldType::Url => "URL",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field definition inside a form template.
///
/// Keys other than `name`, `type` and `label` (placeholders, hints, ...) are kept in
/// `extra` so a field list comes back exactly as it was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: label.into(),
            extra: Map::new(),
        }
    }
}

const REQUIRED_KEYS: [&str; 3] = ["name", "type", "label"];

/// Parse a field configuration payload into an ordered list of field specs.
///
/// Accepts either a JSON array or a string holding a JSON array (the shape an HTML
/// form post delivers). `null` means "no fields".
pub fn parse_field_config(payload: &Value) -> Result<Vec<FieldSpec>, FieldConfigError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::String(raw) => {
            if raw.trim().is_empty() {
                return Ok(Vec::new());
            }
            let decoded: Value = serde_json::from_str(raw)
                .map_err(|e| FieldConfigError::Malformed(e.to_string()))?;
            validate_field_list(&decoded)
        }
        other => validate_field_list(other),
    }
}

/// Validate an already decoded field list
pub fn validate_field_list(value: &Value) -> Result<Vec<FieldSpec>, FieldConfigError> {
    let items = value.as_array().ok_or(FieldConfigError::NotAList)?;

    let mut specs = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        let object = item.as_object().ok_or(FieldConfigError::NotAMapping { index })?;

        for key in REQUIRED_KEYS {
            let present = object
                .get(key)
                .and_then(Value::as_str)
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false);
            if !present {
                return Err(FieldConfigError::MissingKey { index, key });
            }
        }

        let raw_type = object["type"].as_str().unwrap_or_default();
        let field_type = FieldType::parse(raw_type).ok_or_else(|| FieldConfigError::UnknownType {
            index,
            value: raw_type.to_string(),
        })?;

        let name = object["name"].as_str().unwrap_or_default().to_string();
        if !seen.insert(name.clone()) {
            return Err(FieldConfigError::DuplicateName(name));
        }

        let extra = object
            .iter()
            .filter(|(k, _)| !REQUIRED_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        specs.push(FieldSpec {
            name,
            field_type,
            label: object["label"].as_str().unwrap_or_default().to_string(),
            extra,
        });
    }

    Ok(specs)
}

/// Check that an explicit display field names one of the template's fields
pub fn validate_display_field(
    fields: &[FieldSpec],
    display_field: Option<&str>,
) -> Result<(), FieldConfigError> {
    match display_field {
        Some(name) if !fields.iter().any(|f| f.name == name) => {
            Err(FieldConfigError::UnknownDisplayField(name.to_string()))
        }
        _ => Ok(()),
    }
}
