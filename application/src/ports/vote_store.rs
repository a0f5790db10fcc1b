//! Vote store port
//!
//! The durable record of cast ballots. The store is the sole writer of
//! vote history; no other component mutates it.

use async_trait::async_trait;
use pitchpoll_domain::{Ballot, SessionId, Tally};
use thiserror::Error;

/// Errors from the vote store
#[derive(Error, Debug)]
pub enum VoteStoreError {
    /// The persistence layer could not be reached or failed mid-operation.
    /// A caller retry is safe: `record` is idempotent per participant.
    #[error("Vote store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a record attempt
///
/// `AlreadyVoted` is not a failure: it is the distinguishable outcome of
/// a second vote from the same participant, surfaced for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The ballot was inserted
    Recorded,
    /// A ballot for this `(session_id, participant_id)` already exists;
    /// the stored row was left untouched
    AlreadyVoted,
}

impl RecordOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, RecordOutcome::Recorded)
    }
}

/// Port for recording and counting ballots
///
/// Implementations must make the existence check and the insert in
/// `record` atomic with respect to concurrent calls for the same
/// `(session_id, participant_id)` key; this is the system's only
/// concurrency-sensitive invariant. Everything else is a pure read.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Insert the ballot if no ballot exists for its key
    ///
    /// Returns [`RecordOutcome::Recorded`] on insert, or
    /// [`RecordOutcome::AlreadyVoted`] without modifying the existing row.
    /// A store failure must surface as an error, never a silent drop and
    /// never a double count.
    async fn record(&self, ballot: Ballot) -> Result<RecordOutcome, VoteStoreError>;

    /// Count ballots by choice for the given session
    ///
    /// Returns an empty tally for a session with no votes. No side effects.
    async fn tally(&self, session_id: &SessionId) -> Result<Tally, VoteStoreError>;
}
