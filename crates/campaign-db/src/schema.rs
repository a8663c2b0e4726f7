//! Schema bootstrap for the `campaign_reactions` table

use sqlx::PgPool;
use tracing::info;

/// DDL for the reactions table, its unique pair constraint and indexes
pub const SCHEMA: &str = include_str!("../migrations/0001_campaign_reactions.sql");

/// Create the reactions table if it does not exist
pub async fn apply_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("Reaction schema applied");
    Ok(())
}
