//! Town service authentication: token issuance, the authorization gate for
//! town operations, the credential store and a thin HTTP adapter.

pub mod auth;
pub mod database;
pub mod error;
pub mod handlers;
pub mod state;
pub mod towns;

pub use error::AppError;
pub use state::AppState;
