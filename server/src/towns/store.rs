use std::collections::HashMap;

use shared::types::TownSummary;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Town {
    pub town_id: String,
    pub friendly_name: String,
    pub is_publicly_listed: bool,
    pub update_password: String,
    pub created_by: String,
    pub occupants: Vec<String>,
}

impl Town {
    pub fn summary(&self) -> TownSummary {
        TownSummary {
            town_id: self.town_id.clone(),
            friendly_name: self.friendly_name.clone(),
            current_occupancy: self.occupants.len(),
        }
    }
}

/// In-process registry of live towns, keyed by town id.
#[derive(Debug, Default)]
pub struct TownStore {
    towns: RwLock<HashMap<String, Town>>,
}

impl TownStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(
        &self,
        friendly_name: &str,
        is_publicly_listed: bool,
        created_by: &str,
    ) -> Town {
        let town = Town {
            town_id: Uuid::new_v4().simple().to_string(),
            friendly_name: friendly_name.to_string(),
            is_publicly_listed,
            update_password: Uuid::new_v4().simple().to_string(),
            created_by: created_by.to_string(),
            occupants: Vec::new(),
        };

        self.towns
            .write()
            .await
            .insert(town.town_id.clone(), town.clone());

        info!(
            "Town created! {} (ID: {}) by {}",
            town.friendly_name, town.town_id, created_by
        );
        town
    }

    /// Add `occupant` to the town. Joining twice does not duplicate the entry.
    pub async fn join(&self, town_id: &str, occupant: &str) -> Option<Town> {
        let mut towns = self.towns.write().await;
        let town = towns.get_mut(town_id)?;

        if !town.occupants.iter().any(|o| o == occupant) {
            town.occupants.push(occupant.to_string());
        }
        Some(town.clone())
    }

    pub async fn get(&self, town_id: &str) -> Option<Town> {
        self.towns.read().await.get(town_id).cloned()
    }

    /// Publicly listed towns, sorted by name for a stable listing.
    pub async fn public_towns(&self) -> Vec<TownSummary> {
        let mut listed: Vec<TownSummary> = self
            .towns
            .read()
            .await
            .values()
            .filter(|t| t.is_publicly_listed)
            .map(Town::summary)
            .collect();
        listed.sort_by(|a, b| a.friendly_name.cmp(&b.friendly_name));
        listed
    }

    pub async fn len(&self) -> usize {
        self.towns.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
