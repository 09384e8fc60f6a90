//! Access tokens, the authorization gate and the sign-up / sign-in flow.

pub mod gate;
pub mod password;
pub mod service;
pub mod token;

pub use gate::{AuthorizationDecision, AuthorizationGate, GateState, RejectReason};
pub use password::{Argon2Hasher, PasswordHasher};
pub use service::AuthService;
pub use token::{TokenService, VerificationFailure};
