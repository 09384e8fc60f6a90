//! Types shared between the town auth server and its clients: request and
//! response bodies, token claims and the TOML configuration model.

pub mod config;
pub mod types;
