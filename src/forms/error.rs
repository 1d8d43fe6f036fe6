use thiserror::Error;

/// Problems found while reading a template's field configuration or a record payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldConfigError {
    #[error("Invalid field configuration: {0}")]
    Malformed(String),

    #[error("Fields config must be a list")]
    NotAList,

    #[error("Field #{index} must be a mapping")]
    NotAMapping { index: usize },

    #[error("Field #{index} is missing '{key}'; each field must have 'name', 'type', and 'label' keys")]
    MissingKey { index: usize, key: &'static str },

    #[error("Field #{index} has unknown type '{value}'")]
    UnknownType { index: usize, value: String },

    #[error("Field name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("Display field '{0}' is not one of the form's fields")]
    UnknownDisplayField(String),

    #[error("Employee data must be a mapping")]
    ValuesNotAMapping,

    #[error("Value for '{0}' must be a string, number or boolean")]
    UnsupportedValue(String),
}

impl FieldConfigError {
    /// True when the payload could not be decoded at all, as opposed to decoding into
    /// the wrong shape
    pub fn is_malformed(&self) -> bool {
        matches!(self, FieldConfigError::Malformed(_))
    }
}
