//! Tenant queries

use serde::Serialize;
use sqlx::SqlitePool;

/// Tenant row. Tenants are created by the onboarding flow, which lives
/// outside this service; here they are only read.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRow {
    pub id: String,
    pub name: String,
    pub registration_code: String,
    pub created_at: i64,
}

/// Get tenant by ID
pub async fn get_tenant(pool: &SqlitePool, tenant_id: &str) -> Result<Option<TenantRow>, sqlx::Error> {
    sqlx::query_as::<_, TenantRow>(
        "SELECT id, name, registration_code, created_at FROM tenants WHERE id = ?",
    )
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}
