use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::credential_directory::CredentialDirectory;
use super::session_store::InMemorySessionStore;
use crate::application::ports::{AuthError, Authenticator};
use crate::domain::value_objects::{Credentials, Identity, SessionToken};

/// Authenticator backed by a static user directory and an in-process session table
pub struct LocalAuthenticator {
    directory: Arc<CredentialDirectory>,
    sessions: InMemorySessionStore,
}

impl LocalAuthenticator {
    pub fn new(directory: CredentialDirectory, session_ttl: Duration) -> Self {
        Self {
            directory: Arc::new(directory),
            sessions: InMemorySessionStore::new(session_ttl),
        }
    }

    pub fn sessions(&self) -> &InMemorySessionStore {
        &self.sessions
    }
}

#[async_trait]
impl Authenticator for LocalAuthenticator {
    async fn verify(&self, credentials: &Credentials) -> Result<Option<Identity>, AuthError> {
        let directory = Arc::clone(&self.directory);
        let credentials = credentials.clone();

        // Argon2 is deliberately slow; keep it off the async workers.
        tokio::task::spawn_blocking(move || directory.verify(&credentials))
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?
            .map_err(|e| AuthError::Backend(e.to_string()))
    }

    async fn establish(&self, identity: &Identity) -> Result<SessionToken, AuthError> {
        let purged = self.sessions.purge_expired();
        if purged > 0 {
            debug!(purged, "expired sessions removed");
        }
        Ok(self.sessions.create(identity))
    }

    async fn is_active(&self, token: &SessionToken) -> bool {
        self.sessions.get(token).is_some()
    }

    async fn teardown(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.sessions.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::auth::password::hash_password;

    fn authenticator() -> LocalAuthenticator {
        let directory = CredentialDirectory::from_entries(vec![(
            "alice".to_string(),
            hash_password("s3cret").unwrap(),
        )])
        .unwrap();
        LocalAuthenticator::new(directory, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn session_lifecycle() {
        let auth = authenticator();

        let identity = auth
            .verify(&Credentials::new("alice", "s3cret"))
            .await
            .unwrap()
            .unwrap();
        let token = auth.establish(&identity).await.unwrap();
        assert!(auth.is_active(&token).await);

        auth.teardown(&token).await.unwrap();
        assert!(!auth.is_active(&token).await);
    }

    #[tokio::test]
    async fn wrong_password_yields_no_identity() {
        let auth = authenticator();
        let result = auth
            .verify(&Credentials::new("alice", "guess"))
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(auth.sessions().is_empty());
    }

    #[tokio::test]
    async fn teardown_of_unknown_token_is_harmless() {
        let auth = authenticator();
        let token = SessionToken::from_string("never-issued".to_string());
        assert!(auth.teardown(&token).await.is_ok());
    }
}
