// Service exports
pub mod auth;
pub mod cache;
pub mod export;
pub mod matching;
pub mod memory;
pub mod postgres;
pub mod store;

pub use auth::{AdminAuth, AdminClaims, AuthError};
pub use cache::RevealCache;
pub use export::{matches_csv, ExportError, CSV_FILENAME};
pub use matching::{run_matching, MatchRun, MatchingError};
pub use memory::MemoryStore;
pub use postgres::PostgresClient;
pub use store::{MatchStore, StoreError};
