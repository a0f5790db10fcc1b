//! Ballot record

use crate::participant::ParticipantId;
use crate::session::value_objects::SessionId;
use crate::vote::choice::VoteChoice;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One participant's cast vote
///
/// Created only while the session is in the Active phase, with a
/// server-assigned timestamp. Ballots are never mutated or deleted; the
/// store enforces at most one per `(session_id, participant_id)` pair at
/// write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
    pub choice: VoteChoice,
    pub cast_at: DateTime<Utc>,
}

impl Ballot {
    pub fn new(
        session_id: SessionId,
        participant_id: ParticipantId,
        choice: VoteChoice,
        cast_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id,
            participant_id,
            choice,
            cast_at,
        }
    }

    /// The dedup key the store enforces uniqueness on
    pub fn key(&self) -> (SessionId, ParticipantId) {
        (self.session_id.clone(), self.participant_id.clone())
    }
}
