use sqlx::SqlitePool;
use tracing::info;

/// Current schema version, recorded in `PRAGMA user_version`.
const SCHEMA_VERSION: u32 = 1;

/// Create the credential schema if it does not exist yet.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT    NOT NULL UNIQUE,
            email         TEXT    NOT NULL UNIQUE,
            password_hash TEXT    NOT NULL,
            banned        INTEGER NOT NULL DEFAULT 0,
            is_admin      INTEGER NOT NULL DEFAULT 0,
            previous_town TEXT,
            created_at    INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    // PRAGMA does not accept bound parameters.
    sqlx::query(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))
        .execute(pool)
        .await?;

    info!("Credential schema ready (version {})", SCHEMA_VERSION);
    Ok(())
}
