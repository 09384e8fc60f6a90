use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use super::create::create_tables;
use super::store::{Credential, CredentialStore, CredentialUpdate, NewCredential, StoreError};

const CREDENTIAL_COLUMNS: &str =
    "id, username, email, password_hash, banned, is_admin, previous_town";

/// Credential store backed by a SQLite database through `sqlx`.
#[derive(Debug, Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    /// Open (creating if needed) the database at `url` and ensure the schema.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        info!("Opening credential database: {}", url);

        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// A private in-memory database. The pool is pinned to one connection
    /// that never idles out, otherwise the data would vanish with it.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        create_tables(&pool).await?;
        Ok(Self { pool })
    }
}

/// Unique-constraint violations are the store's duplicate signal.
fn map_write_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Duplicate,
        other => StoreError::Database(other),
    }
}

fn get_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn create_user(&self, new_user: NewCredential) -> Result<Credential, StoreError> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, banned, is_admin, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {}",
            CREDENTIAL_COLUMNS
        );

        let credential = sqlx::query_as::<_, Credential>(&sql)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(new_user.banned)
            .bind(new_user.is_admin)
            .bind(get_timestamp())
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;

        info!(
            "New user made! {} (ID: {})",
            credential.username, credential.id
        );
        Ok(credential)
    }

    async fn update_user(&self, update: CredentialUpdate) -> Result<Credential, StoreError> {
        let sql = format!(
            "UPDATE users SET username = ?1, email = ?2 WHERE id = ?3 RETURNING {}",
            CREDENTIAL_COLUMNS
        );

        let credential = sqlx::query_as::<_, Credential>(&sql)
            .bind(&update.username)
            .bind(&update.email)
            .bind(update.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            .ok_or(StoreError::NotFound)?;

        info!(
            "User updated! username:{} userid:{}",
            credential.username, credential.id
        );
        Ok(credential)
    }

    async fn delete_user(&self, email: &str) -> Result<Credential, StoreError> {
        let sql = format!(
            "DELETE FROM users WHERE email = ?1 RETURNING {}",
            CREDENTIAL_COLUMNS
        );

        let credential = sqlx::query_as::<_, Credential>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)?;

        info!("User deleted! userid:{}", credential.id);
        Ok(credential)
    }

    async fn find_user(&self, email: &str) -> Result<Credential, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE email = ?1", CREDENTIAL_COLUMNS);

        let credential = sqlx::query_as::<_, Credential>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)?;

        debug!("Found user {} by email", credential.id);
        Ok(credential)
    }
}
