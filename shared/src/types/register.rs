use serde::{Deserialize, Serialize};

/// Body of `POST /users`.
///
/// Missing fields deserialize to empty strings so that the server reports
/// them as validation failures rather than JSON errors.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpData {
    #[serde(default, alias = "username")]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignUpResponse {
    pub username: String,
    pub email: String,
}
