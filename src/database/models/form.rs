use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::forms::FieldSpec;
use crate::types::{DbId, Owner};

/// A stored form template (`dynamic_form` row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FormTemplate {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub fields_config: Json<Vec<FieldSpec>>,
    pub display_field: Option<String>,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl FormTemplate {
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields_config.0
    }
}

/// Input for inserting a template; already validated by the service layer
#[derive(Debug, Clone)]
pub struct NewFormTemplate {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
    pub display_field: Option<String>,
    pub owner: Owner,
}

/// Partial update of a template. `None` leaves a column untouched;
/// `display_field: Some(None)` clears the explicit display field.
#[derive(Debug, Clone, Default)]
pub struct FormChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub fields: Option<Vec<FieldSpec>>,
    pub display_field: Option<Option<String>>,
}

impl FormChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.fields.is_none()
            && self.display_field.is_none()
    }
}
