use anyhow::Result;
use sqlx::Executor;

use crate::Connection;

/// Install the database schema.
/// All statements are idempotent, re-running is safe.
pub async fn install(db: &Connection) -> Result<()> {
    let mut conn = db.lock().await;
    let schema_data = include_str!("../db/schema.sql");
    log::info!("installing database schema");
    (*conn).execute(schema_data).await?;
    Ok(())
}
