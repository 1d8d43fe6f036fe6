//! Storage seams for templates and employee records.
//!
//! Services only talk to these traits, so the same rules run against Postgres in
//! production and against [`MemoryStore`](super::memory::MemoryStore) in tests.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    EmployeeFilter, EmployeeRecord, FormChanges, FormTemplate, NewEmployee, NewFormTemplate,
};
use crate::forms::FieldValues;
use crate::types::DbId;

#[async_trait]
pub trait FormStore: Send + Sync {
    /// Insert a template. A name already used by any template, active or not,
    /// fails with [`DatabaseError::Conflict`].
    async fn insert_form(&self, new: NewFormTemplate) -> Result<FormTemplate, DatabaseError>;

    /// Fetch a template regardless of its active flag
    async fn find_form(&self, id: DbId) -> Result<Option<FormTemplate>, DatabaseError>;

    /// Apply changes to an active template; `None` when there is no such active template
    async fn update_form(
        &self,
        id: DbId,
        changes: FormChanges,
    ) -> Result<Option<FormTemplate>, DatabaseError>;

    /// Mark a template inactive. Returns false when the id is unknown.
    async fn deactivate_form(&self, id: DbId) -> Result<bool, DatabaseError>;

    /// Templates newest first
    async fn list_forms(&self, active_only: bool) -> Result<Vec<FormTemplate>, DatabaseError>;
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn insert_employee(&self, new: NewEmployee) -> Result<EmployeeRecord, DatabaseError>;

    /// Fetch a record regardless of its active flag
    async fn find_employee(&self, id: DbId) -> Result<Option<EmployeeRecord>, DatabaseError>;

    /// Overwrite the values of an active record; `None` when there is no such active record
    async fn replace_values(
        &self,
        id: DbId,
        values: FieldValues,
    ) -> Result<Option<EmployeeRecord>, DatabaseError>;

    /// Mark a record inactive. Returns false when the id is unknown.
    async fn deactivate_employee(&self, id: DbId) -> Result<bool, DatabaseError>;

    /// Records matching the filter, newest first
    async fn search_employees(
        &self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<EmployeeRecord>, DatabaseError>;

    /// Active record counts keyed by template id. Templates without active records
    /// are absent.
    async fn count_active_by_form(&self) -> Result<HashMap<DbId, i64>, DatabaseError>;
}

/// Everything the services need from a backend
#[async_trait]
pub trait Store: FormStore + EmployeeStore {
    async fn health_check(&self) -> Result<(), DatabaseError>;

    fn backend_name(&self) -> &'static str;
}
