pub mod http;

pub use http::route;
