use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::params::{blank_as_false, blank_as_none};
use crate::api::format::{EmployeeListItem, EmployeeView};
use crate::api::AppState;
use crate::database::models::EmployeeFilter;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::Statistics;
use crate::types::DbId;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub form_id: Option<DbId>,
    #[serde(default, deserialize_with = "blank_as_false")]
    pub include_inactive: bool,
}

impl From<SearchQuery> for EmployeeFilter {
    fn from(query: SearchQuery) -> Self {
        EmployeeFilter {
            query: query.search,
            form_id: query.form_id,
            active_only: !query.include_inactive,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployee {
    pub form_id: DbId,
    #[serde(default)]
    pub employee_data: Value,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmployee {
    #[serde(default)]
    pub employee_data: Value,
}

/// GET /api/employees?search=&form_id= - newest first
pub async fn employee_list(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<EmployeeListItem>> {
    let Query(query) = query?;
    let filter = EmployeeFilter::from(query);
    let entries = state.employees.search(&filter).await?;
    Ok(ApiResponse::success(entries.iter().map(EmployeeListItem::from).collect()))
}

/// POST /api/employees
pub async fn employee_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<CreateEmployee>, JsonRejection>,
) -> ApiResult<EmployeeView> {
    let Json(input) = body?;
    let entry = state
        .employees
        .create(input.form_id, &input.employee_data, user.owner())
        .await?;
    Ok(ApiResponse::created(EmployeeView::from(&entry)))
}

/// GET /api/employees/statistics
pub async fn employee_statistics(State(state): State<AppState>) -> ApiResult<Statistics> {
    Ok(ApiResponse::success(state.employees.statistics().await?))
}

/// GET /api/employees/:id
pub async fn employee_get(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> ApiResult<EmployeeView> {
    let Path(id) = id?;
    let entry = state.employees.get(id).await?;
    Ok(ApiResponse::success(EmployeeView::from(&entry)))
}

/// PUT /api/employees/:id - full overwrite of the values
pub async fn employee_update(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    body: Result<Json<UpdateEmployee>, JsonRejection>,
) -> ApiResult<EmployeeView> {
    let Path(id) = id?;
    let Json(input) = body?;
    let entry = state.employees.update(id, &input.employee_data).await?;
    Ok(ApiResponse::success(EmployeeView::from(&entry)))
}

/// DELETE /api/employees/:id - soft delete
pub async fn employee_delete(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state.employees.deactivate(id).await?;
    Ok(ApiResponse::no_content())
}
