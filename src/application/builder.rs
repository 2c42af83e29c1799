use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::api::router::AppState;
use crate::application::{
    ports::{Authenticator, ObjectStorage},
    use_cases::{ListFilesUseCase, LoginUseCase, LogoutUseCase, UploadFileUseCase},
};
use crate::config::{Config, ConfigError};
use crate::infrastructure::{
    auth::{CredentialDirectory, CredentialDirectoryError, LocalAuthenticator},
    storage::S3ObjectStorage,
};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credentials(#[from] CredentialDirectoryError),

    #[error("{0} not initialized")]
    NotInitialized(&'static str),
}

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    object_storage: Option<Arc<dyn ObjectStorage>>,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            object_storage: None,
            authenticator: None,
        }
    }

    /// Connect the S3 gateway. Fails fast when required settings are missing.
    pub fn with_s3_storage(mut self) -> Result<Self, BuildError> {
        self.config.validate()?;

        let storage = S3ObjectStorage::from_config(&self.config);
        info!(
            bucket = %storage.bucket(),
            region = %self.config.aws_region,
            endpoint = ?self.config.s3_endpoint_url,
            "S3 storage initialized"
        );

        self.object_storage = Some(Arc::new(storage));
        Ok(self)
    }

    /// Use an already constructed object storage (tests, embedders)
    pub fn with_object_storage(mut self, storage: Arc<dyn ObjectStorage>) -> Self {
        self.object_storage = Some(storage);
        self
    }

    /// Load the user directory and set up the in-process session store
    pub async fn with_local_authentication(mut self) -> Result<Self, BuildError> {
        let directory = match &self.config.auth_users_file {
            Some(path) => CredentialDirectory::load(path).await?,
            None => {
                warn!("AUTH_USERS_FILE not set; every login will be rejected");
                CredentialDirectory::empty()
            }
        };

        let authenticator = LocalAuthenticator::new(
            directory,
            Duration::from_secs(self.config.session_ttl_secs),
        );
        self.authenticator = Some(Arc::new(authenticator));
        info!(
            session_ttl_secs = self.config.session_ttl_secs,
            "Authentication initialized"
        );
        Ok(self)
    }

    /// Use an already constructed authenticator (tests, embedders)
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, BuildError> {
        let object_storage = self
            .object_storage
            .ok_or(BuildError::NotInitialized("Object storage"))?;
        let authenticator = self
            .authenticator
            .ok_or(BuildError::NotInitialized("Authenticator"))?;

        let list_use_case = Arc::new(ListFilesUseCase::new(Arc::clone(&object_storage)));
        let upload_use_case = Arc::new(UploadFileUseCase::new(Arc::clone(&object_storage)));
        let login_use_case = Arc::new(LoginUseCase::new(Arc::clone(&authenticator)));
        let logout_use_case = Arc::new(LogoutUseCase::new(Arc::clone(&authenticator)));

        info!("Application layer initialized");

        Ok(AppState {
            list_use_case,
            upload_use_case,
            login_use_case,
            logout_use_case,
            authenticator,
            config: self.config,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
