use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::forms::FieldValues;
use crate::types::{DbId, Owner};

/// A stored employee record (`employee` row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeRecord {
    pub id: DbId,
    pub form_id: DbId,
    pub employee_data: Json<FieldValues>,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl EmployeeRecord {
    pub fn values(&self) -> &FieldValues {
        &self.employee_data.0
    }
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub form_id: DbId,
    pub values: FieldValues,
    pub owner: Owner,
}

/// Search criteria for employee listings
#[derive(Debug, Clone)]
pub struct EmployeeFilter {
    pub query: Option<String>,
    pub form_id: Option<DbId>,
    pub active_only: bool,
}

impl Default for EmployeeFilter {
    fn default() -> Self {
        Self { query: None, form_id: None, active_only: true }
    }
}

impl EmployeeFilter {
    /// The search text, if there is any non-blank text to search for
    pub fn query_text(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}
