//! # Certificate Vault - Per-user certificate storage on S3
//!
//! A thin HTTP backend that files uploaded certificates under
//! `{user}/{certificate_type}/{document}/` keys in an S3 bucket, lists them
//! back, and manages cookie sessions for the browser frontend.
//!
//! ## Architecture Layers
//!
//! - **Domain**: key segments, key builder, file entries
//! - **Application**: use cases and ports (object storage, authenticator)
//! - **Infrastructure**: S3 and in-memory storage, credential file and session store
//! - **API**: HTTP handlers and middleware
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use certificate_vault::{
//!     api::create_router, infrastructure::storage::InMemoryObjectStorage, ApplicationBuilder,
//!     Config,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = ApplicationBuilder::new(Config::from_env())
//!     .with_object_storage(Arc::new(InMemoryObjectStorage::new()))
//!     .with_local_authentication()
//!     .await?
//!     .build()?;
//! let _app = create_router(state);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::builder::{ApplicationBuilder, BuildError};
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
