//! In-process store used by tests and `STORE_BACKEND=memory` runs.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    EmployeeFilter, EmployeeRecord, FormChanges, FormTemplate, NewEmployee, NewFormTemplate,
};
use crate::database::store::{EmployeeStore, FormStore, Store};
use crate::forms::{matches_query, FieldValues};
use crate::types::DbId;

#[derive(Default)]
struct Tables {
    forms: BTreeMap<DbId, FormTemplate>,
    employees: BTreeMap<DbId, EmployeeRecord>,
    next_form_id: DbId,
    next_employee_id: DbId,
}

impl Tables {
    fn name_in_use(&self, name: &str, except: Option<DbId>) -> bool {
        self.forms
            .values()
            .any(|f| f.name == name && Some(f.id) != except)
    }
}

/// Every write takes the single write lock, so the name check and the insert are one
/// atomic step just like the unique constraint in Postgres.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(name: &str) -> DatabaseError {
    DatabaseError::Conflict(format!("A form named '{}' already exists", name))
}

/// Newest first; ids break ties between rows created in the same instant
fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, DbId)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl FormStore for MemoryStore {
    async fn insert_form(&self, new: NewFormTemplate) -> Result<FormTemplate, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.name_in_use(&new.name, None) {
            return Err(name_taken(&new.name));
        }

        tables.next_form_id += 1;
        let now = Utc::now();
        let form = FormTemplate {
            id: tables.next_form_id,
            name: new.name,
            description: new.description,
            fields_config: Json(new.fields),
            display_field: new.display_field,
            owner_id: new.owner.user_id,
            owner_name: new.owner.username,
            created_at: now,
            updated_at: now,
            is_active: true,
        };
        tables.forms.insert(form.id, form.clone());
        Ok(form)
    }

    async fn find_form(&self, id: DbId) -> Result<Option<FormTemplate>, DatabaseError> {
        Ok(self.tables.read().await.forms.get(&id).cloned())
    }

    async fn update_form(
        &self,
        id: DbId,
        changes: FormChanges,
    ) -> Result<Option<FormTemplate>, DatabaseError> {
        let mut tables = self.tables.write().await;

        let active = tables.forms.get(&id).map(|f| f.is_active).unwrap_or(false);
        if !active {
            return Ok(None);
        }
        if let Some(name) = changes.name.as_deref() {
            if tables.name_in_use(name, Some(id)) {
                return Err(name_taken(name));
            }
        }

        let Some(form) = tables.forms.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            form.name = name;
        }
        if let Some(description) = changes.description {
            form.description = Some(description);
        }
        if let Some(fields) = changes.fields {
            form.fields_config = Json(fields);
        }
        if let Some(display_field) = changes.display_field {
            form.display_field = display_field;
        }
        form.updated_at = Utc::now();
        Ok(Some(form.clone()))
    }

    async fn deactivate_form(&self, id: DbId) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.forms.get_mut(&id) {
            Some(form) => {
                if form.is_active {
                    form.is_active = false;
                    form.updated_at = Utc::now();
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_forms(&self, active_only: bool) -> Result<Vec<FormTemplate>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut forms: Vec<FormTemplate> = tables
            .forms
            .values()
            .filter(|f| !active_only || f.is_active)
            .cloned()
            .collect();
        newest_first(&mut forms, |f| (f.created_at, f.id));
        Ok(forms)
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn insert_employee(&self, new: NewEmployee) -> Result<EmployeeRecord, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.forms.contains_key(&new.form_id) {
            // Mirrors the foreign key on employee.form_id
            return Err(DatabaseError::QueryError(format!(
                "form {} does not exist",
                new.form_id
            )));
        }

        tables.next_employee_id += 1;
        let now = Utc::now();
        let record = EmployeeRecord {
            id: tables.next_employee_id,
            form_id: new.form_id,
            employee_data: Json(new.values),
            owner_id: new.owner.user_id,
            owner_name: new.owner.username,
            created_at: now,
            updated_at: now,
            is_active: true,
        };
        tables.employees.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_employee(&self, id: DbId) -> Result<Option<EmployeeRecord>, DatabaseError> {
        Ok(self.tables.read().await.employees.get(&id).cloned())
    }

    async fn replace_values(
        &self,
        id: DbId,
        values: FieldValues,
    ) -> Result<Option<EmployeeRecord>, DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.employees.get_mut(&id) {
            Some(record) if record.is_active => {
                record.employee_data = Json(values);
                record.updated_at = Utc::now();
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn deactivate_employee(&self, id: DbId) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.employees.get_mut(&id) {
            Some(record) => {
                if record.is_active {
                    record.is_active = false;
                    record.updated_at = Utc::now();
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn search_employees(
        &self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<EmployeeRecord>, DatabaseError> {
        let tables = self.tables.read().await;
        let query = filter.query_text();

        let mut records: Vec<EmployeeRecord> = tables
            .employees
            .values()
            .filter(|e| !filter.active_only || e.is_active)
            .filter(|e| filter.form_id.map_or(true, |id| e.form_id == id))
            .filter(|e| match query {
                Some(q) => {
                    let form_name = tables
                        .forms
                        .get(&e.form_id)
                        .map(|f| f.name.as_str())
                        .unwrap_or_default();
                    matches_query(q, e.values(), form_name)
                }
                None => true,
            })
            .cloned()
            .collect();
        newest_first(&mut records, |e| (e.created_at, e.id));
        Ok(records)
    }

    async fn count_active_by_form(&self) -> Result<HashMap<DbId, i64>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut counts = HashMap::new();
        for record in tables.employees.values().filter(|e| e.is_active) {
            *counts.entry(record.form_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
