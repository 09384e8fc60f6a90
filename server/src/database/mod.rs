pub mod create;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use create::create_tables;
pub use memory::MemoryCredentialStore;
pub use sqlite::SqliteCredentialStore;
pub use store::{Credential, CredentialStore, CredentialUpdate, NewCredential, StoreError};
