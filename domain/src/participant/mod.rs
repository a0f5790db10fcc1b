//! Participant identity value objects.

use serde::{Deserialize, Serialize};

/// Unique identifier for a voting participant.
///
/// Derived from the participant's connection context (e.g., a digest of a
/// per-connection session token) by an identity resolver in the
/// infrastructure layer. The domain treats it as an opaque token: equality
/// is all that matters, because the vote store deduplicates ballots by
/// `(SessionId, ParticipantId)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Creates a ParticipantId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for ParticipantId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_id_equality() {
        assert_eq!(ParticipantId::new("abc"), ParticipantId::new("abc"));
        assert_ne!(ParticipantId::new("abc"), ParticipantId::new("abd"));
    }
}
