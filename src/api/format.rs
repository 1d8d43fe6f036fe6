//! Wire shapes for templates and employee records.
//!
//! Stored rows keep owner ids and typed JSON columns; clients see the flatter
//! documents built here.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::models::FormTemplate;
use crate::forms::{FieldSpec, FieldValues};
use crate::services::{EmployeeEntry, FormSummary};
use crate::types::DbId;

/// Full template document
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub fields_config: Vec<FieldSpec>,
    pub display_field: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<i64>,
}

impl FormView {
    /// Template without a record count, as nested inside an employee document
    pub fn bare(form: &FormTemplate) -> Self {
        Self {
            id: form.id,
            name: form.name.clone(),
            description: form.description.clone(),
            fields_config: form.fields().to_vec(),
            display_field: form.display_field.clone(),
            created_by: form.owner_name.clone(),
            created_at: form.created_at,
            updated_at: form.updated_at,
            is_active: form.is_active,
            employee_count: None,
        }
    }
}

impl From<&FormSummary> for FormView {
    fn from(summary: &FormSummary) -> Self {
        Self {
            employee_count: Some(summary.employee_count),
            ..Self::bare(&summary.form)
        }
    }
}

/// Full record document, returned by create, update and get
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeView {
    pub id: DbId,
    pub form: FormView,
    pub employee_data: FieldValues,
    pub display_name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&EmployeeEntry> for EmployeeView {
    fn from(entry: &EmployeeEntry) -> Self {
        let record = &entry.record;
        Self {
            id: record.id,
            form: FormView::bare(&entry.form),
            employee_data: record.values().clone(),
            display_name: entry.display_name.clone(),
            created_by: record.owner_name.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            is_active: record.is_active,
        }
    }
}

/// Compact row for record listings
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeListItem {
    pub id: DbId,
    pub form_id: DbId,
    pub form_name: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&EmployeeEntry> for EmployeeListItem {
    fn from(entry: &EmployeeEntry) -> Self {
        Self {
            id: entry.record.id,
            form_id: entry.form.id,
            form_name: entry.form.name.clone(),
            display_name: entry.display_name.clone(),
            created_at: entry.record.created_at,
            is_active: entry.record.is_active,
        }
    }
}
