use std::sync::{Arc, LazyLock};

use shared::types::SignInResponse;
use tracing::{error, info, warn};

use super::password::{Argon2Hasher, PasswordHasher};
use super::token::TokenService;
use crate::database::{Credential, CredentialStore, NewCredential, StoreError};
use crate::error::AppError;

/// Valid Argon2id hash of a throwaway password. Sign-in verifies against it
/// when the email is unknown, so both failure paths cost one hash check.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    Argon2Hasher
        .hash("town-sign-in-placeholder")
        .unwrap_or_default()
});

/// Sign-up and sign-in on top of a credential store.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Register a new account. Nothing is hashed or stored unless every
    /// field is present.
    pub async fn sign_up(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Credential, AppError> {
        let username = username.trim();
        let email = email.trim();

        if username.is_empty() {
            return Err(AppError::Validation("userName"));
        }
        if email.is_empty() {
            return Err(AppError::Validation("email"));
        }
        if password.is_empty() {
            return Err(AppError::Validation("password"));
        }

        info!("Processing sign-up for {}", username);

        let password_hash = self.hasher.hash(password).map_err(|e| {
            error!("Password hashing failed during sign-up: {}", e);
            AppError::Internal(e)
        })?;

        let credential = self
            .store
            .create_user(NewCredential::new(
                username.to_string(),
                email.to_string(),
                password_hash,
            ))
            .await
            .map_err(|e| {
                if matches!(e, StoreError::Duplicate) {
                    warn!("Sign-up conflict for {}", username);
                }
                AppError::from(e)
            })?;

        info!(
            "User registered successfully: {} (ID: {})",
            credential.username, credential.id
        );
        Ok(credential)
    }

    /// Check credentials and issue an access token.
    ///
    /// An unknown email and a wrong password produce the same
    /// [`AppError::Authentication`], so callers cannot probe for accounts.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResponse, AppError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(AppError::Validation("email"));
        }
        if password.is_empty() {
            return Err(AppError::Validation("password"));
        }

        let credential = match self.store.find_user(email).await {
            Ok(credential) => credential,
            Err(StoreError::NotFound) => {
                warn!("Sign-in for unknown email");
                let _ = self.hasher.verify(password, &DUMMY_HASH);
                return Err(AppError::Authentication);
            }
            Err(e) => {
                error!("Database error during sign-in: {}", e);
                return Err(e.into());
            }
        };

        let password_valid = self
            .hasher
            .verify(password, &credential.password_hash)
            .map_err(|e| {
                error!("Password verification error: {}", e);
                AppError::Internal(e)
            })?;

        if !password_valid {
            warn!("Invalid password for user: {}", credential.username);
            return Err(AppError::Authentication);
        }

        if credential.banned {
            warn!("Banned user attempted sign-in: {}", credential.username);
            return Err(AppError::Banned);
        }

        let access_token = self.tokens.sign(&credential.username)?;

        info!(
            "Sign-in successful for user: {} (ID: {})",
            credential.username, credential.id
        );

        Ok(SignInResponse {
            username: credential.username,
            access_token,
        })
    }
}
