//! Tenant route handlers

use axum::{extract::State, Extension, Json};

use super::AppState;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::queries::tenant::{get_tenant, TenantRow};

/// GET /tenants/current - The authenticated user's tenant
///
/// Users who have not completed onboarding have no tenant yet and get 403;
/// assignment happens in the onboarding flow outside this service.
pub async fn current(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<TenantRow>, AppError> {
    let Some(tenant_id) = current.user.tenant_id.as_deref() else {
        return Err(AppError::Forbidden("onboarding required".to_string()));
    };

    let tenant = get_tenant(&state.pool, tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("tenant not found".to_string()))?;

    Ok(Json(tenant))
}
