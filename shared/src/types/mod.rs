pub mod json_error;
pub mod jwt;
pub mod login;
pub mod register;
pub mod server_config;
pub mod town;

pub use self::json_error::ErrorResponse;
pub use self::jwt::AccessClaims;
pub use self::login::{SignInData, SignInResponse};
pub use self::register::{SignUpData, SignUpResponse};
pub use self::server_config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, ServerConfig};
pub use self::town::{
    TownCreateData, TownCreateResponse, TownJoinData, TownJoinResponse, TownListResponse,
    TownSummary,
};
