pub mod service;
pub mod store;

pub use service::TownService;
pub use store::{Town, TownStore};
