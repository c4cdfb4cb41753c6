//! Location queries
//!
//! Every operation is scoped by tenant id; a location is never visible or
//! mutable outside its owning tenant.

use serde::Serialize;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRow {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub address: Option<String>,
    pub created_at: i64,
}

/// List every location of a tenant, oldest first
pub async fn list_locations(
    pool: &SqlitePool,
    tenant_id: &str,
) -> Result<Vec<LocationRow>, sqlx::Error> {
    sqlx::query_as::<_, LocationRow>(
        "SELECT id, tenant_id, name, address, created_at
         FROM locations WHERE tenant_id = ? ORDER BY created_at, id",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

/// Get one location of a tenant
pub async fn get_location(
    pool: &SqlitePool,
    tenant_id: &str,
    location_id: &str,
) -> Result<Option<LocationRow>, sqlx::Error> {
    sqlx::query_as::<_, LocationRow>(
        "SELECT id, tenant_id, name, address, created_at
         FROM locations WHERE tenant_id = ? AND id = ?",
    )
    .bind(tenant_id)
    .bind(location_id)
    .fetch_optional(pool)
    .await
}

/// Create a location under a tenant
pub async fn insert_location(
    pool: &SqlitePool,
    tenant_id: &str,
    name: &str,
    address: Option<&str>,
) -> Result<LocationRow, sqlx::Error> {
    let row = LocationRow {
        id: Ulid::new().to_string(),
        tenant_id: tenant_id.to_string(),
        name: name.to_string(),
        address: address.map(str::to_string),
        created_at: OffsetDateTime::now_utc().unix_timestamp(),
    };

    sqlx::query(
        "INSERT INTO locations (id, tenant_id, name, address, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&row.id)
    .bind(&row.tenant_id)
    .bind(&row.name)
    .bind(&row.address)
    .bind(row.created_at)
    .execute(pool)
    .await?;

    Ok(row)
}

/// Update a tenant's location; returns the fresh row or None if absent
pub async fn update_location(
    pool: &SqlitePool,
    tenant_id: &str,
    location_id: &str,
    name: &str,
    address: Option<&str>,
) -> Result<Option<LocationRow>, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE locations SET name = ?, address = ? WHERE tenant_id = ? AND id = ?",
    )
    .bind(name)
    .bind(address)
    .bind(tenant_id)
    .bind(location_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_location(pool, tenant_id, location_id).await
}

/// Delete a tenant's location; false if it was already absent
pub async fn delete_location(
    pool: &SqlitePool,
    tenant_id: &str,
    location_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM locations WHERE tenant_id = ? AND id = ?")
        .bind(tenant_id)
        .bind(location_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
