use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query, State,
    },
    Json,
};
use serde::Deserialize;

use super::params::blank_as_false;
use crate::api::format::FormView;
use crate::api::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{CreateForm, FormFields, FormPatch};
use crate::types::DbId;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Include deactivated templates
    #[serde(default, deserialize_with = "blank_as_false")]
    pub include_inactive: bool,
}

/// GET /api/forms - templates newest first, each with its employee count
pub async fn form_list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Vec<FormView>> {
    let Query(query) = query?;
    let summaries = state.forms.summaries(!query.include_inactive).await?;
    Ok(ApiResponse::success(summaries.iter().map(FormView::from).collect()))
}

/// POST /api/forms - create a template owned by the caller
pub async fn form_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<CreateForm>, JsonRejection>,
) -> ApiResult<FormView> {
    let Json(input) = body?;
    let form = state.forms.create(input, user.owner()).await?;
    let summary = state.forms.summarize(form).await?;
    Ok(ApiResponse::created(FormView::from(&summary)))
}

/// GET /api/forms/:id
pub async fn form_get(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> ApiResult<FormView> {
    let Path(id) = id?;
    let form = state.forms.get(id).await?;
    let summary = state.forms.summarize(form).await?;
    Ok(ApiResponse::success(FormView::from(&summary)))
}

/// PUT|PATCH /api/forms/:id - partial update; absent members stay untouched
pub async fn form_update(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    body: Result<Json<FormPatch>, JsonRejection>,
) -> ApiResult<FormView> {
    let Path(id) = id?;
    let Json(patch) = body?;
    let form = state.forms.update(id, patch).await?;
    let summary = state.forms.summarize(form).await?;
    Ok(ApiResponse::success(FormView::from(&summary)))
}

/// DELETE /api/forms/:id - soft delete
pub async fn form_delete(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state.forms.deactivate(id).await?;
    Ok(ApiResponse::no_content())
}

/// GET /api/forms/:id/fields
pub async fn form_fields(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> ApiResult<FormFields> {
    let Path(id) = id?;
    Ok(ApiResponse::success(state.forms.fields(id).await?))
}
