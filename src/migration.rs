//! Startup DDL: create the database if missing, then the entity tables.

use crate::config::DbConfig;
use crate::entity::{EntityDef, ALL};
use crate::error::StoreError;
use crate::sql::quoted;
use sqlx::{ConnectOptions, PgConnection, PgPool};

/// Creates the configured database when the server does not have it yet.
/// Connects to the maintenance database to do so.
pub async fn ensure_database_exists(db: &DbConfig) -> Result<(), StoreError> {
    if db.name.is_empty() || db.name == "postgres" {
        return Ok(());
    }
    let mut conn: PgConnection = db.admin_options().connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db.name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db.name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db.name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

pub fn create_table_sql(entity: &EntityDef) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\
         id BIGSERIAL PRIMARY KEY, \
         firstname TEXT NOT NULL, \
         lastname TEXT NOT NULL, \
         year INTEGER NOT NULL)",
        quoted(entity.table)
    )
}

/// Creates every entity table. Idempotent.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    for entity in ALL.iter() {
        sqlx::query(&create_table_sql(entity)).execute(pool).await?;
        tracing::debug!(table = entity.table, "table ready");
    }
    Ok(())
}
