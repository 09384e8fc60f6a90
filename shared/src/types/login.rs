use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sign-in wire types
// ---------------------------------------------------------------------------

/// Body of `POST /login`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignInData {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Returned on a successful sign-in. The token is opaque to the client and
/// goes back either in a request body's `accessToken` field or as a Bearer
/// header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub username: String,
    pub access_token: String,
}
