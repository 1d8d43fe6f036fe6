use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    EmployeeFilter, EmployeeRecord, FormChanges, FormTemplate, NewEmployee, NewFormTemplate,
};
use crate::database::store::{EmployeeStore, FormStore, Store};
use crate::forms::search::like_pattern;
use crate::forms::FieldValues;
use crate::types::DbId;

/// Column list for `dynamic_form` queries.
const FORM_COLUMNS: &str = "\
    id, name, description, fields_config, display_field, \
    owner_id, owner_name, created_at, updated_at, is_active";

/// Column list for `employee` queries.
const EMPLOYEE_COLUMNS: &str = "\
    id, form_id, employee_data, owner_id, owner_name, \
    created_at, updated_at, is_active";

/// Same columns qualified with the `e` alias used when joining templates.
const EMPLOYEE_COLUMNS_QUALIFIED: &str = "\
    e.id, e.form_id, e.employee_data, e.owner_id, e.owner_name, \
    e.created_at, e.updated_at, e.is_active";

/// Postgres-backed store. Field lists and values live in JSONB columns.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn name_taken(name: &str) -> String {
    format!("A form named '{}' already exists", name)
}

#[async_trait]
impl FormStore for PgStore {
    async fn insert_form(&self, new: NewFormTemplate) -> Result<FormTemplate, DatabaseError> {
        let query = format!(
            "INSERT INTO dynamic_form \
                (name, description, fields_config, display_field, owner_id, owner_name) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {FORM_COLUMNS}"
        );
        sqlx::query_as::<_, FormTemplate>(&query)
            .bind(&new.name)
            .bind(new.description.as_deref())
            .bind(Json(&new.fields))
            .bind(new.display_field.as_deref())
            .bind(new.owner.user_id)
            .bind(&new.owner.username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, || name_taken(&new.name)))
    }

    async fn find_form(&self, id: DbId) -> Result<Option<FormTemplate>, DatabaseError> {
        let query = format!("SELECT {FORM_COLUMNS} FROM dynamic_form WHERE id = $1");
        let form = sqlx::query_as::<_, FormTemplate>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(form)
    }

    async fn update_form(
        &self,
        id: DbId,
        changes: FormChanges,
    ) -> Result<Option<FormTemplate>, DatabaseError> {
        let query = format!(
            "UPDATE dynamic_form SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                fields_config = COALESCE($4, fields_config), \
                display_field = CASE WHEN $5 THEN $6 ELSE display_field END, \
                updated_at = now() \
             WHERE id = $1 AND is_active \
             RETURNING {FORM_COLUMNS}"
        );
        let conflict_name = changes.name.clone().unwrap_or_default();
        let (set_display, display_field) = match changes.display_field {
            Some(value) => (true, value),
            None => (false, None),
        };

        sqlx::query_as::<_, FormTemplate>(&query)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.fields.as_ref().map(Json))
            .bind(set_display)
            .bind(display_field)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, || name_taken(&conflict_name)))
    }

    async fn deactivate_form(&self, id: DbId) -> Result<bool, DatabaseError> {
        // Re-deactivating keeps updated_at so the call stays a no-op
        let result = sqlx::query(
            "UPDATE dynamic_form \
             SET updated_at = CASE WHEN is_active THEN now() ELSE updated_at END, \
                 is_active = FALSE \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_forms(&self, active_only: bool) -> Result<Vec<FormTemplate>, DatabaseError> {
        let query = format!(
            "SELECT {FORM_COLUMNS} FROM dynamic_form \
             WHERE ($1 = FALSE OR is_active) \
             ORDER BY created_at DESC, id DESC"
        );
        let forms = sqlx::query_as::<_, FormTemplate>(&query)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;
        Ok(forms)
    }
}

#[async_trait]
impl EmployeeStore for PgStore {
    async fn insert_employee(&self, new: NewEmployee) -> Result<EmployeeRecord, DatabaseError> {
        let query = format!(
            "INSERT INTO employee (form_id, employee_data, owner_id, owner_name) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        let record = sqlx::query_as::<_, EmployeeRecord>(&query)
            .bind(new.form_id)
            .bind(Json(&new.values))
            .bind(new.owner.user_id)
            .bind(&new.owner.username)
            .fetch_one(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_employee(&self, id: DbId) -> Result<Option<EmployeeRecord>, DatabaseError> {
        let query = format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE id = $1");
        let record = sqlx::query_as::<_, EmployeeRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn replace_values(
        &self,
        id: DbId,
        values: FieldValues,
    ) -> Result<Option<EmployeeRecord>, DatabaseError> {
        let query = format!(
            "UPDATE employee SET employee_data = $2, updated_at = now() \
             WHERE id = $1 AND is_active \
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        let record = sqlx::query_as::<_, EmployeeRecord>(&query)
            .bind(id)
            .bind(Json(&values))
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn deactivate_employee(&self, id: DbId) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE employee \
             SET updated_at = CASE WHEN is_active THEN now() ELSE updated_at END, \
                 is_active = FALSE \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_employees(
        &self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<EmployeeRecord>, DatabaseError> {
        // Keys and values are matched one by one, like MemoryStore
        let query = format!(
            "SELECT {EMPLOYEE_COLUMNS_QUALIFIED} \
             FROM employee e \
             JOIN dynamic_form f ON f.id = e.form_id \
             WHERE ($1 = FALSE OR e.is_active) \
               AND ($2::BIGINT IS NULL OR e.form_id = $2) \
               AND ($3::TEXT IS NULL \
                    OR f.name ILIKE $3 \
                    OR EXISTS (SELECT 1 FROM jsonb_each_text(e.employee_data) AS kv(key, value) \
                               WHERE kv.key ILIKE $3 OR kv.value ILIKE $3)) \
             ORDER BY e.created_at DESC, e.id DESC"
        );
        let pattern = filter.query_text().map(like_pattern);

        let records = sqlx::query_as::<_, EmployeeRecord>(&query)
            .bind(filter.active_only)
            .bind(filter.form_id)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn count_active_by_form(&self) -> Result<HashMap<DbId, i64>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT form_id, COUNT(*) AS count FROM employee \
             WHERE is_active GROUP BY form_id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut counts = HashMap::with_capacity(rows.len());
        for row in rows {
            let form_id: DbId = row.try_get("form_id")?;
            let count: i64 = row.try_get("count")?;
            counts.insert(form_id, count);
        }
        Ok(counts)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
