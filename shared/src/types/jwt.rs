use serde::{Deserialize, Serialize};

/// Claims embedded in every access token issued by the server.
///
/// Tokens carry no `exp`. A token stays valid for as long as the signing
/// secret is unchanged; restarting with a new secret invalidates all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Standard JWT subject, set to the username.
    pub sub: String,

    /// Issued-at (Unix timestamp, seconds).
    pub iat: u64,

    /// Random UUID so two tokens for the same user never collide.
    pub jti: String,
}
