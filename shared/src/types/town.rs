use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Town wire types
//
// Field names follow the existing town client (`coveyTownID` and friends),
// so the serde renames here are load-bearing.
// ---------------------------------------------------------------------------

/// Body of `POST /towns`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TownCreateData {
    #[serde(default)]
    pub friendly_name: String,
    #[serde(default)]
    pub is_publicly_listed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TownCreateResponse {
    #[serde(rename = "coveyTownID")]
    pub town_id: String,
    #[serde(rename = "coveyTownPassword")]
    pub town_password: String,
}

/// Body of `POST /sessions`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TownJoinData {
    #[serde(default)]
    pub user_name: String,
    #[serde(default, rename = "coveyTownID")]
    pub town_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TownJoinResponse {
    #[serde(rename = "coveyTownID")]
    pub town_id: String,
    pub friendly_name: String,
    pub occupants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TownSummary {
    #[serde(rename = "coveyTownID")]
    pub town_id: String,
    pub friendly_name: String,
    pub current_occupancy: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TownListResponse {
    pub towns: Vec<TownSummary>,
}
