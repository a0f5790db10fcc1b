//! Infrastructure layer for pitchpoll
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod clock;
pub mod config;
pub mod identity;
pub mod store;

// Re-export commonly used types
pub use clock::SystemClock;
pub use config::{ConfigLoader, ConfigValidationError, FileConfig, FileConsoleConfig,
    FileSharesConfig, FileStoreConfig, FileWindowConfig};
pub use identity::TokenIdentityResolver;
pub use store::{JsonlVoteStore, MemoryVoteStore};
