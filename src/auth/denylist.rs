//! Revoked token ids.
//!
//! Logout puts the token's `jti` here until the token would have expired on
//! its own; after that the expiry check rejects it, so the entry is
//! dropped by `purge_expired`.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct TokenDenylist {
    revoked: Arc<Mutex<HashMap<Uuid, i64>>>,
}

impl TokenDenylist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke a token id until `expires_at` (unix seconds).
    pub fn revoke(&self, token_id: Uuid, expires_at: i64) {
        self.revoked.lock().insert(token_id, expires_at);
    }

    pub fn is_revoked(&self, token_id: &Uuid) -> bool {
        self.revoked.lock().contains_key(token_id)
    }

    /// Drop entries whose token has expired by `now`. Returns how many were removed.
    pub fn purge_expired(&self, now: i64) -> usize {
        let mut revoked = self.revoked.lock();
        let before = revoked.len();
        revoked.retain(|_, expires_at| *expires_at > now);
        before - revoked.len()
    }

    pub fn len(&self) -> usize {
        self.revoked.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revoke_and_lookup() {
        let denylist = TokenDenylist::new();
        let jti = Uuid::new_v4();

        assert!(!denylist.is_revoked(&jti));
        denylist.revoke(jti, 1_000);
        assert!(denylist.is_revoked(&jti));
        assert!(!denylist.is_revoked(&Uuid::new_v4()));
    }

    #[test]
    fn test_purge_only_drops_expired_entries() {
        let denylist = TokenDenylist::new();
        let old = Uuid::new_v4();
        let fresh = Uuid::new_v4();
        denylist.revoke(old, 100);
        denylist.revoke(fresh, 500);

        assert_eq!(denylist.purge_expired(100), 1);
        assert!(!denylist.is_revoked(&old));
        assert!(denylist.is_revoked(&fresh));
        assert_eq!(denylist.len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let denylist = TokenDenylist::new();
        let handle = denylist.clone();
        let jti = Uuid::new_v4();

        handle.revoke(jti, i64::MAX);
        assert!(denylist.is_revoked(&jti));
    }
}
