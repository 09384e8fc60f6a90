use async_trait::async_trait;
use thiserror::Error;

/// A stored user record. Owned by the store; the rest of the server only
/// ever holds copies.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Credential {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub banned: bool,
    pub is_admin: bool,
    pub previous_town: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCredential {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub banned: bool,
    pub is_admin: bool,
}

impl NewCredential {
    /// A regular, unbanned account.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
            banned: false,
            is_admin: false,
        }
    }
}

/// Profile change keyed by the store-assigned id.
#[derive(Debug, Clone)]
pub struct CredentialUpdate {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Email or username already taken.
    #[error("credential already exists")]
    Duplicate,

    #[error("credential not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence for user credentials.
///
/// Every operation touches a single record and is atomic. Uniqueness of
/// email and username is enforced here, not by callers.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create_user(&self, new_user: NewCredential) -> Result<Credential, StoreError>;

    async fn update_user(&self, update: CredentialUpdate) -> Result<Credential, StoreError>;

    /// Delete by email, returning the removed record.
    async fn delete_user(&self, email: &str) -> Result<Credential, StoreError>;

    async fn find_user(&self, email: &str) -> Result<Credential, StoreError>;
}
