//! Participant identity port
//!
//! Deriving the per-connection identifier is a swappable capability: the
//! shipped adapter hashes a session token, but a cookie, bearer token, or
//! fingerprint source can be slotted in without touching voting logic.

use pitchpoll_domain::ParticipantId;
use thiserror::Error;

/// Errors from identity resolution
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdentityError {
    /// No connection context is available to derive an identity from.
    /// Callers must treat this as "vote rejected, retry".
    #[error("No connection context available to establish a participant identity")]
    Unavailable,
}

/// The ambient context of one participant connection
///
/// Carries the opaque per-connection session token the identity adapter
/// derives a [`ParticipantId`] from. A context without a token (e.g., a
/// request that arrived outside any session) cannot vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionContext {
    session_token: Option<String>,
}

impl ConnectionContext {
    /// Context for a connection with a session token
    pub fn new(session_token: impl Into<String>) -> Self {
        Self {
            session_token: Some(session_token.into()),
        }
    }

    /// Context for a connection with no resolvable session
    pub fn anonymous() -> Self {
        Self {
            session_token: None,
        }
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

/// Port for deriving a stable participant identifier from a connection
///
/// Contract: the same connection context always yields the same id within
/// its lifetime; distinct contexts yield distinct ids with overwhelmingly
/// high probability. Collisions would merge two participants' voting
/// rights, so adapters must use a well-distributed hash over a
/// sufficiently large token space.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, context: &ConnectionContext) -> Result<ParticipantId, IdentityError>;
}
