//! Application layer for pitchpoll
//!
//! This crate contains the poll controller use case and the port
//! definitions its adapters implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    clock::{Clock, FixedClock},
    identity::{ConnectionContext, IdentityError, IdentityResolver},
    vote_store::{RecordOutcome, VoteStore, VoteStoreError},
};
pub use use_cases::poll_controller::{PollController, PollError, PollStatus};
