//! Per-request authorization decisions.
//!
//! Every protected operation asks the gate whether it may run. The gate walks
//! a small state machine, computed fresh for each call and never stored:
//!
//!   NoTokenProvided ──(identity required)──▶ Rejected(missing token)
//!   NoTokenProvided ──(identity optional)──▶ Anonymous
//!   TokenProvided   ──(verify ok)──────────▶ Verified(identity)
//!   TokenProvided   ──(verify fails)───────▶ Rejected(invalid token)
//!
//! `Verified` and `Anonymous` let the operation proceed; `Rejected` means the
//! operation must not perform its side effect. An empty token string is still
//! a provided token and goes through verification like any other.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::token::TokenService;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingToken,
    InvalidToken,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing token",
            Self::InvalidToken => "invalid token",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState<'a> {
    NoTokenProvided,
    TokenProvided(&'a str),
    /// Terminal: proceed as `identity`.
    Verified(String),
    /// Terminal: proceed without an identity.
    Anonymous,
    /// Terminal: do not proceed.
    Rejected(RejectReason),
}

impl GateState<'_> {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Verified(_) | Self::Anonymous | Self::Rejected(_)
        )
    }
}

/// Outcome of [`AuthorizationGate::authorize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationDecision {
    pub authorized: bool,
    pub identity: Option<String>,
    pub reason: Option<String>,
}

impl AuthorizationDecision {
    pub fn verified(identity: String) -> Self {
        Self {
            authorized: true,
            identity: Some(identity),
            reason: None,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authorized: true,
            identity: None,
            reason: None,
        }
    }

    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            authorized: false,
            identity: None,
            reason: Some(reason.to_string()),
        }
    }

    pub fn is_verified(&self) -> bool {
        self.authorized && self.identity.is_some()
    }

    /// `Ok(Some(identity))` when verified, `Ok(None)` when anonymous, and a
    /// generic authentication error when rejected.
    pub fn into_identity(self) -> Result<Option<String>, AppError> {
        if self.authorized {
            Ok(self.identity)
        } else {
            Err(AppError::Authentication)
        }
    }
}

/// Holds no state beyond the shared, read-only token service.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    tokens: Arc<TokenService>,
}

impl AuthorizationGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    pub fn authorize(&self, token: Option<&str>, require_identity: bool) -> AuthorizationDecision {
        let mut state = match token {
            None => GateState::NoTokenProvided,
            Some(t) => GateState::TokenProvided(t),
        };

        while !state.is_terminal() {
            state = self.step(state, require_identity);
        }

        match state {
            GateState::Verified(identity) => {
                debug!("Request authorized as {}", identity);
                AuthorizationDecision::verified(identity)
            }
            GateState::Rejected(reason) => {
                warn!("Request rejected: {}", reason);
                AuthorizationDecision::rejected(reason)
            }
            GateState::Anonymous => AuthorizationDecision::anonymous(),
            GateState::NoTokenProvided | GateState::TokenProvided(_) => {
                unreachable!("authorize loop exits only on terminal states")
            }
        }
    }

    fn step<'a>(&self, state: GateState<'a>, require_identity: bool) -> GateState<'a> {
        match state {
            GateState::NoTokenProvided if require_identity => {
                GateState::Rejected(RejectReason::MissingToken)
            }
            GateState::NoTokenProvided => GateState::Anonymous,
            GateState::TokenProvided(token) => match self.tokens.verify(token) {
                Ok(identity) => GateState::Verified(identity),
                Err(_) => GateState::Rejected(RejectReason::InvalidToken),
            },
            terminal => terminal,
        }
    }
}
