use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::password::{validate_hash, verify_password, PasswordError};
use crate::domain::value_objects::{Credentials, Identity};

#[derive(Debug, Error)]
pub enum CredentialDirectoryError {
    #[error("Failed to read user file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse user file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("User {0:?} has an invalid password hash")]
    InvalidHash(String),

    #[error("User {0:?} is defined more than once")]
    DuplicateUser(String),
}

#[derive(Debug, Deserialize)]
struct UserFile {
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    username: String,
    password_hash: String,
}

/// Username to Argon2 PHC hash mapping, loaded once at startup.
///
/// ```toml
/// [[users]]
/// username = "alice"
/// password_hash = "$argon2id$v=19$m=19456,t=2,p=1$..."
/// ```
#[derive(Debug, Clone, Default)]
pub struct CredentialDirectory {
    users: HashMap<String, String>,
}

impl CredentialDirectory {
    /// Directory with no users; every login fails
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, CredentialDirectoryError> {
        let file: UserFile = toml::from_str(contents)?;
        Self::from_entries(
            file.users
                .into_iter()
                .map(|record| (record.username, record.password_hash)),
        )
    }

    pub fn from_entries<I>(entries: I) -> Result<Self, CredentialDirectoryError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut users = HashMap::new();
        for (username, password_hash) in entries {
            validate_hash(&password_hash)
                .map_err(|_| CredentialDirectoryError::InvalidHash(username.clone()))?;
            if users.contains_key(&username) {
                return Err(CredentialDirectoryError::DuplicateUser(username));
            }
            users.insert(username, password_hash);
        }
        Ok(Self { users })
    }

    pub async fn load(path: &Path) -> Result<Self, CredentialDirectoryError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CredentialDirectoryError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
        let directory = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), users = directory.len(), "user directory loaded");
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Check a password against the stored hash. Unknown users are rejected.
    /// CPU-bound; call from a blocking context.
    pub fn verify(&self, credentials: &Credentials) -> Result<Option<Identity>, PasswordError> {
        let Some(hash) = self.users.get(credentials.username()) else {
            return Ok(None);
        };

        if verify_password(hash, credentials.password())? {
            Ok(Some(Identity::new(credentials.username())))
        } else {
            Ok(None)
        }
    }
}
