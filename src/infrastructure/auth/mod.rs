mod credential_directory;
mod local_authenticator;
pub mod password;
mod session_store;

pub use credential_directory::{CredentialDirectory, CredentialDirectoryError};
pub use local_authenticator::LocalAuthenticator;
pub use session_store::InMemorySessionStore;
