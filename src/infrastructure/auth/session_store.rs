use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use sha2::{Digest, Sha256};

use crate::domain::value_objects::{Identity, SessionToken};

#[derive(Debug, Clone)]
struct SessionRecord {
    identity: Identity,
    expires_at: DateTime<Utc>,
}

/// Process-local session table keyed by the SHA-256 of the session token
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionRecord>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
        }
    }

    fn digest(token: &SessionToken) -> String {
        hex::encode(Sha256::digest(token.as_str().as_bytes()))
    }

    pub fn create(&self, identity: &Identity) -> SessionToken {
        let token = SessionToken::generate();
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.sessions.insert(
            Self::digest(&token),
            SessionRecord {
                identity: identity.clone(),
                expires_at,
            },
        );
        token
    }

    /// Identity behind a live session. Expired sessions are dropped on lookup.
    pub fn get(&self, token: &SessionToken) -> Option<Identity> {
        let key = Self::digest(token);
        let now = Utc::now();
        if let Some(record) = self.sessions.get(&key) {
            if record.expires_at > now {
                return Some(record.identity.clone());
            }
        }
        self.sessions.remove_if(&key, |_, record| record.expires_at <= now);
        None
    }

    pub fn remove(&self, token: &SessionToken) -> bool {
        self.sessions.remove(&Self::digest(token)).is_some()
    }

    /// Drop every expired session; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut removed = 0;
        self.sessions.retain(|_, record| {
            let live = record.expires_at > now;
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
