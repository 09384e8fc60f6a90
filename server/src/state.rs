use std::sync::Arc;

use crate::auth::{AuthService, AuthorizationGate, PasswordHasher, TokenService};
use crate::database::CredentialStore;
use crate::towns::{TownService, TownStore};

/// Everything a request handler needs. Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub gate: AuthorizationGate,
    pub towns: TownService,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        let gate = AuthorizationGate::new(tokens.clone());
        Self {
            auth: AuthService::new(store, hasher, tokens),
            gate: gate.clone(),
            towns: TownService::new(gate, Arc::new(TownStore::new())),
        }
    }
}
