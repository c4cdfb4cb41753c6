//! Location route handlers
//!
//! All operations run inside the caller's tenant; callers without a tenant
//! (onboarding pending) are rejected before any query runs.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::queries::location::{
    delete_location, get_location, insert_location, list_locations, update_location, LocationRow,
};

#[derive(Debug, Deserialize)]
pub struct LocationBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub success: bool,
}

fn tenant_of(current: &CurrentUser) -> Result<&str, AppError> {
    current
        .user
        .tenant_id
        .as_deref()
        .ok_or_else(|| AppError::Forbidden("onboarding required".to_string()))
}

fn validate_body(body: &LocationBody) -> Result<(), AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::InvalidInput("name is required".to_string()));
    }
    Ok(())
}

/// GET /locations - List the tenant's locations
pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<LocationRow>>, AppError> {
    let tenant_id = tenant_of(&current)?;
    let rows = list_locations(&state.pool, tenant_id).await?;
    Ok(Json(rows))
}

/// POST /locations - Create a location under the tenant
#[tracing::instrument(skip(state, current, body), fields(user_id = %current.user.id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<LocationBody>,
) -> Result<Json<LocationRow>, AppError> {
    let tenant_id = tenant_of(&current)?;
    validate_body(&body)?;

    let row = insert_location(
        &state.pool,
        tenant_id,
        body.name.trim(),
        body.address.as_deref(),
    )
    .await?;

    Ok(Json(row))
}

/// GET /locations/{id} - One location of the tenant
pub async fn detail(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<LocationRow>, AppError> {
    let tenant_id = tenant_of(&current)?;
    let row = get_location(&state.pool, tenant_id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("location not found".to_string()))?;

    Ok(Json(row))
}

/// PUT /locations/{id} - Update a location of the tenant
#[tracing::instrument(skip(state, current, body), fields(user_id = %current.user.id))]
pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<LocationBody>,
) -> Result<Json<LocationRow>, AppError> {
    let tenant_id = tenant_of(&current)?;
    validate_body(&body)?;

    let row = update_location(
        &state.pool,
        tenant_id,
        &id,
        body.name.trim(),
        body.address.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("location not found".to_string()))?;

    Ok(Json(row))
}

/// DELETE /locations/{id} - Remove a location of the tenant
pub async fn remove(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    let tenant_id = tenant_of(&current)?;

    if !delete_location(&state.pool, tenant_id, &id).await? {
        return Err(AppError::NotFound("location not found".to_string()));
    }

    Ok(Json(DeletedResponse { success: true }))
}
