use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::database::models::{FormChanges, FormTemplate, NewFormTemplate};
use crate::database::Store;
use crate::forms::{parse_field_config, validate_display_field, FieldSpec};
use crate::services::error::ServiceError;
use crate::types::{DbId, Operation, Owner};

/// Longest template name the `dynamic_form.name` column accepts
pub const MAX_NAME_LEN: usize = 200;

/// Input for creating a template. `fields_config` is the raw payload, either a JSON
/// array of field specs or a string holding one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateForm {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub fields_config: Value,
    pub display_field: Option<String>,
}

/// Partial template update. Absent members are left alone; an empty
/// `display_field` clears the explicit display field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub fields_config: Option<Value>,
    pub display_field: Option<String>,
}

/// A template together with its active employee count
#[derive(Debug, Clone)]
pub struct FormSummary {
    pub form: FormTemplate,
    pub employee_count: i64,
}

/// What a client needs to render an entry form
#[derive(Debug, Clone, Serialize)]
pub struct FormFields {
    pub form_id: DbId,
    pub form_name: String,
    pub fields: Vec<FieldInput>,
}

/// A field as submitted, plus the display label of its input type
#[derive(Debug, Clone, Serialize)]
pub struct FieldInput {
    #[serde(flatten)]
    pub spec: FieldSpec,
    pub type_label: &'static str,
}

impl From<FieldSpec> for FieldInput {
    fn from(spec: FieldSpec) -> Self {
        let type_label = spec.field_type.label();
        Self { spec, type_label }
    }
}

/// Template store operations
#[derive(Clone)]
pub struct FormService {
    store: Arc<dyn Store>,
}

impl FormService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: CreateForm, owner: &Owner) -> Result<FormTemplate, ServiceError> {
        let name = validate_name(&input.name)?;
        let fields = parse_field_config(&input.fields_config).map_err(|e| {
            warn!("Rejected field configuration for form '{}': {}", name, e);
            ServiceError::from(e)
        })?;
        let display_field = input.display_field.filter(|d| !d.is_empty());
        validate_display_field(&fields, display_field.as_deref())?;

        let form = self
            .store
            .insert_form(NewFormTemplate {
                name,
                description: input.description,
                fields,
                display_field,
                owner: owner.clone(),
            })
            .await?;

        info!(
            operation = ?Operation::Create,
            form_id = form.id,
            fields = form.fields().len(),
            owner = %owner.username,
            "Form '{}' created",
            form.name
        );
        Ok(form)
    }

    pub async fn update(&self, id: DbId, patch: FormPatch) -> Result<FormTemplate, ServiceError> {
        let current = self.get(id).await?;

        let name = patch.name.as_deref().map(validate_name).transpose()?;
        let fields = patch
            .fields_config
            .as_ref()
            .map(parse_field_config)
            .transpose()?;
        let effective_fields = fields.as_deref().unwrap_or(current.fields());

        let display_field = match patch.display_field {
            Some(d) if d.is_empty() => Some(None),
            Some(d) => {
                validate_display_field(effective_fields, Some(d.as_str()))?;
                Some(Some(d))
            }
            // A display field that disappeared with the new field list is dropped
            None => match current.display_field.as_deref() {
                Some(d) if !effective_fields.iter().any(|f| f.name == d) => Some(None),
                _ => None,
            },
        };

        let changes = FormChanges {
            name,
            description: patch.description,
            fields,
            display_field,
        };
        if changes.is_empty() {
            return Ok(current);
        }

        let form = self
            .store
            .update_form(id, changes)
            .await?
            .ok_or_else(|| form_not_found(id))?;

        info!(operation = ?Operation::Update, form_id = id, "Form '{}' updated", form.name);
        Ok(form)
    }

    /// Soft delete. Deactivating an inactive form succeeds and changes nothing.
    pub async fn deactivate(&self, id: DbId) -> Result<(), ServiceError> {
        if !self.store.deactivate_form(id).await? {
            return Err(form_not_found(id));
        }
        info!(operation = ?Operation::Deactivate, form_id = id, "Form deactivated");
        Ok(())
    }

    /// An active template
    pub async fn get(&self, id: DbId) -> Result<FormTemplate, ServiceError> {
        self.store
            .find_form(id)
            .await?
            .filter(|f| f.is_active)
            .ok_or_else(|| form_not_found(id))
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<FormTemplate>, ServiceError> {
        Ok(self.store.list_forms(active_only).await?)
    }

    pub async fn fields(&self, id: DbId) -> Result<FormFields, ServiceError> {
        let form = self.get(id).await?;
        Ok(FormFields {
            form_id: form.id,
            form_name: form.name.clone(),
            fields: form.fields_config.0.into_iter().map(FieldInput::from).collect(),
        })
    }

    /// Templates with their active employee counts, newest first
    pub async fn summaries(&self, active_only: bool) -> Result<Vec<FormSummary>, ServiceError> {
        let forms = self.store.list_forms(active_only).await?;
        let counts = self.store.count_active_by_form().await?;
        Ok(forms
            .into_iter()
            .map(|form| FormSummary {
                employee_count: counts.get(&form.id).copied().unwrap_or(0),
                form,
            })
            .collect())
    }

    pub async fn summarize(&self, form: FormTemplate) -> Result<FormSummary, ServiceError> {
        let counts = self.store.count_active_by_form().await?;
        Ok(FormSummary {
            employee_count: counts.get(&form.id).copied().unwrap_or(0),
            form,
        })
    }
}

fn form_not_found(id: DbId) -> ServiceError {
    ServiceError::not_found(format!("Form {} not found", id))
}

fn validate_name(raw: &str) -> Result<String, ServiceError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ServiceError::validation("Form name required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ServiceError::validation(format!(
            "Form name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name.to_string())
}
