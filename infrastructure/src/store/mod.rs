//! Vote store adapters
//!
//! - [`MemoryVoteStore`] — process-lifetime map, the default for tests
//!   and ephemeral runs
//! - [`JsonlVoteStore`] — durable append-only ballot log

mod jsonl;
mod memory;

pub use jsonl::JsonlVoteStore;
pub use memory::MemoryVoteStore;
