//! Form templates and the rules that shape records against them.
//!
//! Nothing in here touches storage: field configuration parsing, projection of raw
//! input onto a template, display names and search matching are all pure functions.

pub mod display;
pub mod error;
pub mod field_spec;
pub mod projection;
pub mod search;

pub use display::display_name;
pub use error::FieldConfigError;
pub use field_spec::{parse_field_config, validate_display_field, FieldSpec, FieldType};
pub use projection::{coerce_raw_values, project, FieldValues};
pub use search::matches_query;
