pub mod auth;
pub mod routes;
pub mod towns;
pub mod utils;

pub use routes::route;
