//! Session-token identity resolver

use pitchpoll_application::{ConnectionContext, IdentityError, IdentityResolver};
use pitchpoll_domain::ParticipantId;
use sha2::{Digest, Sha256};

/// Derives a participant id as a SHA-256 digest of the per-connection
/// session token.
///
/// The digest is deterministic (same token, same id) and well distributed
/// over a 256-bit space, so two live connections colliding on one id is
/// not a practical concern. A collision would merge two participants'
/// voting rights, which is why a cryptographic hash is used here rather
/// than a fast 64-bit one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenIdentityResolver;

impl TokenIdentityResolver {
    pub fn new() -> Self {
        Self
    }

    fn digest(token: &str) -> ParticipantId {
        let hash = Sha256::digest(token.as_bytes());
        ParticipantId::new(format!("{:x}", hash))
    }
}

impl IdentityResolver for TokenIdentityResolver {
    fn resolve(&self, context: &ConnectionContext) -> Result<ParticipantId, IdentityError> {
        context
            .session_token()
            .map(Self::digest)
            .ok_or(IdentityError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_token_same_id() {
        let resolver = TokenIdentityResolver::new();
        let a = resolver.resolve(&ConnectionContext::new("tok-1")).unwrap();
        let b = resolver.resolve(&ConnectionContext::new("tok-1")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_tokens_distinct_ids() {
        let resolver = TokenIdentityResolver::new();
        let a = resolver.resolve(&ConnectionContext::new("tok-1")).unwrap();
        let b = resolver.resolve(&ConnectionContext::new("tok-2")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_token_is_unavailable() {
        let resolver = TokenIdentityResolver::new();
        let err = resolver
            .resolve(&ConnectionContext::anonymous())
            .unwrap_err();
        assert_eq!(err, IdentityError::Unavailable);
    }

    #[test]
    fn test_id_is_hex_digest() {
        let resolver = TokenIdentityResolver::new();
        let id = resolver.resolve(&ConnectionContext::new("tok-1")).unwrap();
        assert_eq!(id.as_str().len(), 64);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
