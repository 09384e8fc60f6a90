use std::sync::Arc;

use shared::types::{
    TownCreateData, TownCreateResponse, TownJoinData, TownJoinResponse, TownListResponse,
};
use tracing::{info, warn};

use super::store::TownStore;
use crate::auth::AuthorizationGate;
use crate::error::AppError;

/// Town operations behind the authorization gate. The registry is only
/// touched once the gate has let the request through.
#[derive(Debug, Clone)]
pub struct TownService {
    gate: AuthorizationGate,
    towns: Arc<TownStore>,
}

impl TownService {
    pub fn new(gate: AuthorizationGate, towns: Arc<TownStore>) -> Self {
        Self { gate, towns }
    }

    pub fn towns(&self) -> &Arc<TownStore> {
        &self.towns
    }

    fn required_identity(&self, token: Option<&str>) -> Result<String, AppError> {
        self.gate
            .authorize(token, true)
            .into_identity()?
            .ok_or(AppError::Authentication)
    }

    pub async fn create_town(&self, data: TownCreateData) -> Result<TownCreateResponse, AppError> {
        let creator = self.required_identity(data.access_token.as_deref())?;

        let friendly_name = data.friendly_name.trim();
        if friendly_name.is_empty() {
            return Err(AppError::Validation("friendlyName"));
        }

        let town = self
            .towns
            .create(friendly_name, data.is_publicly_listed, &creator)
            .await;

        Ok(TownCreateResponse {
            town_id: town.town_id,
            town_password: town.update_password,
        })
    }

    pub async fn join_town(&self, data: TownJoinData) -> Result<TownJoinResponse, AppError> {
        let identity = self.required_identity(data.access_token.as_deref())?;

        if data.user_name.trim().is_empty() {
            return Err(AppError::Validation("userName"));
        }
        if data.town_id.trim().is_empty() {
            return Err(AppError::Validation("coveyTownID"));
        }

        let town = self
            .towns
            .join(data.town_id.trim(), &identity)
            .await
            .ok_or_else(|| {
                warn!("Join attempt for unknown town {}", data.town_id);
                AppError::NotFound("town")
            })?;

        info!(
            "{} (as {}) joined town {}",
            identity,
            data.user_name.trim(),
            town.town_id
        );

        Ok(TownJoinResponse {
            town_id: town.town_id,
            friendly_name: town.friendly_name,
            occupants: town.occupants,
        })
    }

    /// Listing needs no identity, but a presented token must still verify.
    pub async fn list_towns(&self, token: Option<&str>) -> Result<TownListResponse, AppError> {
        self.gate.authorize(token, false).into_identity()?;

        Ok(TownListResponse {
            towns: self.towns.public_towns().await,
        })
    }
}
