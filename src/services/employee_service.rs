use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::database::models::{EmployeeFilter, EmployeeRecord, FormTemplate, NewEmployee};
use crate::database::Store;
use crate::forms::{coerce_raw_values, display_name, project};
use crate::services::error::ServiceError;
use crate::types::{DbId, Operation, Owner};

/// A record joined with the template it belongs to
#[derive(Debug, Clone)]
pub struct EmployeeEntry {
    pub record: EmployeeRecord,
    pub form: FormTemplate,
    pub display_name: String,
}

impl EmployeeEntry {
    fn new(record: EmployeeRecord, form: FormTemplate) -> Self {
        let display_name = display_name(
            record.id,
            form.fields(),
            form.display_field.as_deref(),
            record.values(),
        );
        Self { record, form, display_name }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateCount {
    #[serde(rename = "form_id")]
    pub template_id: DbId,
    #[serde(rename = "form_name")]
    pub name: String,
    #[serde(rename = "employee_count")]
    pub count: i64,
}

/// Counts over active records of active templates, computed per call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    #[serde(rename = "total_employees")]
    pub total_active_records: i64,
    #[serde(rename = "total_forms")]
    pub total_active_templates: i64,
    #[serde(rename = "forms_breakdown")]
    pub per_template: Vec<TemplateCount>,
}

/// Record store operations
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn Store>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Store a new record against an active template. `raw_values` is the submitted
    /// JSON object; keys the template does not declare are dropped.
    pub async fn create(
        &self,
        form_id: DbId,
        raw_values: &Value,
        owner: &Owner,
    ) -> Result<EmployeeEntry, ServiceError> {
        let form = self
            .store
            .find_form(form_id)
            .await?
            .filter(|f| f.is_active)
            .ok_or_else(|| ServiceError::not_found(format!("Form {} not found", form_id)))?;

        let raw = coerce_raw_values(raw_values)?;
        let values = project(form.fields(), &raw);

        let record = self
            .store
            .insert_employee(NewEmployee { form_id, values, owner: owner.clone() })
            .await?;

        info!(
            operation = ?Operation::Create,
            employee_id = record.id,
            form_id,
            owner = %owner.username,
            "Employee created"
        );
        Ok(EmployeeEntry::new(record, form))
    }

    /// Replace all values of an active record, re-projected through the template's
    /// current field list
    pub async fn update(&self, id: DbId, raw_values: &Value) -> Result<EmployeeEntry, ServiceError> {
        let current = self.active_record(id).await?;
        let form = self.form_of(&current).await?;

        let raw = coerce_raw_values(raw_values)?;
        let values = project(form.fields(), &raw);

        let record = self
            .store
            .replace_values(id, values)
            .await?
            .ok_or_else(|| employee_not_found(id))?;

        info!(operation = ?Operation::Update, employee_id = id, "Employee updated");
        Ok(EmployeeEntry::new(record, form))
    }

    /// Soft delete; repeat calls succeed
    pub async fn deactivate(&self, id: DbId) -> Result<(), ServiceError> {
        if !self.store.deactivate_employee(id).await? {
            return Err(employee_not_found(id));
        }
        info!(operation = ?Operation::Deactivate, employee_id = id, "Employee deactivated");
        Ok(())
    }

    pub async fn get(&self, id: DbId) -> Result<EmployeeEntry, ServiceError> {
        let record = self.active_record(id).await?;
        let form = self.form_of(&record).await?;
        Ok(EmployeeEntry::new(record, form))
    }

    /// Free-text search over values and template names, newest first
    pub async fn search(&self, filter: &EmployeeFilter) -> Result<Vec<EmployeeEntry>, ServiceError> {
        let records = self.store.search_employees(filter).await?;
        let forms: HashMap<DbId, FormTemplate> = self
            .store
            .list_forms(false)
            .await?
            .into_iter()
            .map(|f| (f.id, f))
            .collect();

        Ok(records
            .into_iter()
            .filter_map(|record| {
                let form = forms.get(&record.form_id)?.clone();
                Some(EmployeeEntry::new(record, form))
            })
            .collect())
    }

    pub async fn statistics(&self) -> Result<Statistics, ServiceError> {
        let forms = self.store.list_forms(true).await?;
        let counts = self.store.count_active_by_form().await?;

        let per_template: Vec<TemplateCount> = forms
            .into_iter()
            .map(|form| TemplateCount {
                count: counts.get(&form.id).copied().unwrap_or(0),
                template_id: form.id,
                name: form.name,
            })
            .collect();

        Ok(Statistics {
            total_active_records: per_template.iter().map(|t| t.count).sum(),
            total_active_templates: per_template.len() as i64,
            per_template,
        })
    }

    async fn active_record(&self, id: DbId) -> Result<EmployeeRecord, ServiceError> {
        self.store
            .find_employee(id)
            .await?
            .filter(|e| e.is_active)
            .ok_or_else(|| employee_not_found(id))
    }

    /// The owning template, active or not
    async fn form_of(&self, record: &EmployeeRecord) -> Result<FormTemplate, ServiceError> {
        self.store.find_form(record.form_id).await?.ok_or_else(|| {
            ServiceError::not_found(format!("Form {} not found", record.form_id))
        })
    }
}

fn employee_not_found(id: DbId) -> ServiceError {
    ServiceError::not_found(format!("Employee {} not found", id))
}
