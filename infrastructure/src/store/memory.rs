//! In-memory vote store

use async_trait::async_trait;
use pitchpoll_application::{RecordOutcome, VoteStore, VoteStoreError};
use pitchpoll_domain::{Ballot, ParticipantId, SessionId, Tally};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

/// Ballot store backed by a mutex-guarded map
///
/// The mutex serializes the check-then-insert in [`record`], which is the
/// only concurrency-sensitive operation in the system: two simultaneous
/// casts from the same participant resolve to exactly one `Recorded` and
/// one `AlreadyVoted`.
///
/// [`record`]: VoteStore::record
#[derive(Debug, Default)]
pub struct MemoryVoteStore {
    ballots: Mutex<HashMap<(SessionId, ParticipantId), Ballot>>,
}

impl MemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoteStore for MemoryVoteStore {
    async fn record(&self, ballot: Ballot) -> Result<RecordOutcome, VoteStoreError> {
        let mut ballots = self
            .ballots
            .lock()
            .map_err(|_| VoteStoreError::Unavailable("ballot map poisoned".into()))?;
        match ballots.entry(ballot.key()) {
            Entry::Occupied(_) => Ok(RecordOutcome::AlreadyVoted),
            Entry::Vacant(slot) => {
                slot.insert(ballot);
                Ok(RecordOutcome::Recorded)
            }
        }
    }

    async fn tally(&self, session_id: &SessionId) -> Result<Tally, VoteStoreError> {
        let ballots = self
            .ballots
            .lock()
            .map_err(|_| VoteStoreError::Unavailable("ballot map poisoned".into()))?;
        Ok(Tally::from_choices(
            ballots
                .values()
                .filter(|b| &b.session_id == session_id)
                .map(|b| b.choice),
        ))
    }
}
