//! Session value objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one poll instance (Value Object)
///
/// A fresh id is minted on every `Idle -> Countdown` transition and never
/// reused across resets, so ballots recorded under an old id can never
/// leak into a new session's tally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a new unique session id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reconstruct a session id from its canonical string form
    /// (e.g., when replaying a durable ballot log)
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
