use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::application::ports::{AuthError, Authenticator};
use crate::domain::value_objects::SessionToken;

#[derive(Debug, Error)]
pub enum LogoutError {
    #[error("User is not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Use case: end the caller's session
pub struct LogoutUseCase {
    authenticator: Arc<dyn Authenticator>,
}

impl LogoutUseCase {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    pub async fn execute(&self, token: Option<SessionToken>) -> Result<(), LogoutError> {
        let token = token.ok_or(LogoutError::NotAuthenticated)?;

        if !self.authenticator.is_active(&token).await {
            return Err(LogoutError::NotAuthenticated);
        }

        self.authenticator.teardown(&token).await?;
        info!("session closed");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockAuthenticator;

    #[tokio::test]
    async fn test_logout_active_session() {
        let mut mock_auth = MockAuthenticator::new();
        mock_auth.expect_is_active().times(1).returning(|_| true);
        mock_auth.expect_teardown().times(1).returning(|_| Ok(()));

        let use_case = LogoutUseCase::new(Arc::new(mock_auth));
        let result = use_case
            .execute(Some(SessionToken::from_string("tok".to_string())))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_logout_without_cookie() {
        let mut mock_auth = MockAuthenticator::new();
        mock_auth.expect_is_active().never();
        mock_auth.expect_teardown().never();

        let use_case = LogoutUseCase::new(Arc::new(mock_auth));
        let err = use_case.execute(None).await.unwrap_err();

        assert!(matches!(err, LogoutError::NotAuthenticated));
        assert_eq!(err.to_string(), "User is not authenticated");
    }

    #[tokio::test]
    async fn test_logout_expired_session() {
        let mut mock_auth = MockAuthenticator::new();
        mock_auth.expect_is_active().returning(|_| false);
        mock_auth.expect_teardown().never();

        let use_case = LogoutUseCase::new(Arc::new(mock_auth));
        let err = use_case
            .execute(Some(SessionToken::from_string("stale".to_string())))
            .await
            .unwrap_err();

        assert!(matches!(err, LogoutError::NotAuthenticated));
    }
}
