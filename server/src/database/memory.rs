use async_trait::async_trait;
use tokio::sync::Mutex;

use super::store::{Credential, CredentialStore, CredentialUpdate, NewCredential, StoreError};

/// In-process credential store with the same uniqueness rules as the SQLite
/// one. Used by tests and local runs that need no database.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Records>,
}

#[derive(Debug, Default)]
struct Records {
    next_id: i64,
    users: Vec<Credential>,
}

impl Records {
    fn taken(&self, username: &str, email: &str, except_id: Option<i64>) -> bool {
        self.users
            .iter()
            .filter(|u| Some(u.id) != except_id)
            .any(|u| u.username == username || u.email == email)
    }
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create_user(&self, new_user: NewCredential) -> Result<Credential, StoreError> {
        let mut records = self.inner.lock().await;
        if records.taken(&new_user.username, &new_user.email, None) {
            return Err(StoreError::Duplicate);
        }

        records.next_id += 1;
        let credential = Credential {
            id: records.next_id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            banned: new_user.banned,
            is_admin: new_user.is_admin,
            previous_town: None,
        };
        records.users.push(credential.clone());
        Ok(credential)
    }

    async fn update_user(&self, update: CredentialUpdate) -> Result<Credential, StoreError> {
        let mut records = self.inner.lock().await;
        let index = records
            .users
            .iter()
            .position(|u| u.id == update.id)
            .ok_or(StoreError::NotFound)?;

        if records.taken(&update.username, &update.email, Some(update.id)) {
            return Err(StoreError::Duplicate);
        }

        let user = &mut records.users[index];
        user.username = update.username;
        user.email = update.email;
        Ok(user.clone())
    }

    async fn delete_user(&self, email: &str) -> Result<Credential, StoreError> {
        let mut records = self.inner.lock().await;
        let index = records
            .users
            .iter()
            .position(|u| u.email == email)
            .ok_or(StoreError::NotFound)?;
        Ok(records.users.remove(index))
    }

    async fn find_user(&self, email: &str) -> Result<Credential, StoreError> {
        self.inner
            .lock()
            .await
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
