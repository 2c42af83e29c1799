mod in_memory_object_storage;
mod s3_object_storage;

pub use in_memory_object_storage::InMemoryObjectStorage;
pub use s3_object_storage::S3ObjectStorage;
