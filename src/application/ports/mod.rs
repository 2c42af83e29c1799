mod authenticator;
mod object_storage;

pub use authenticator::{AuthError, Authenticator};
pub use object_storage::{ObjectPayload, ObjectStorage, PayloadReader, StorageError};

#[cfg(test)]
pub use authenticator::MockAuthenticator;
#[cfg(test)]
pub use object_storage::MockObjectStorage;
