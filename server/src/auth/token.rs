//! Access-token signing and verification.
//!
//! Tokens are HS256 JWTs over [`AccessClaims`]. The signature covers the
//! encoded header and payload, so any change to either is detected. Tokens
//! carry no expiry (see DESIGN.md); validation neither requires nor checks
//! `exp`.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use shared::types::AccessClaims;
use thiserror::Error;
use tracing::debug;

use crate::error::AppError;

/// A token that did not verify. Empty, truncated, garbage, tampered and
/// foreign-secret tokens all produce this same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid access token")]
pub struct VerificationFailure;

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build the service around the process-wide secret.
    pub fn new(secret: &str) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::Configuration("token secret is not set".into()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Sign `identity` (a username) into a fresh access token.
    pub fn sign(&self, identity: &str) -> Result<String, AppError> {
        if identity.is_empty() {
            return Err(AppError::Validation("identity"));
        }

        let claims = AccessClaims {
            sub: identity.to_string(),
            iat: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign access token: {}", e)))
    }

    /// Recover the identity from `token`, or fail. Never panics.
    pub fn verify(&self, token: &str) -> Result<String, VerificationFailure> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                debug!("Access token rejected: {}", e);
                VerificationFailure
            })?;

        if data.claims.sub.is_empty() {
            debug!("Access token rejected: empty subject");
            return Err(VerificationFailure);
        }

        Ok(data.claims.sub)
    }
}
