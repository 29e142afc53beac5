//! Object storage for uploaded documents.
//!
//! Documents are written through the [`ObjectStore`] trait so the ingestion
//! pipeline can run against any backend:
//!
//! - [`MemoryObjectStore`] keeps objects in a concurrent map (dev/test)
//! - `S3ObjectStore` (`s3` feature) writes to S3 or any S3-compatible
//!   service such as `MinIO`
//!
//! All S3 settings share an [`AwsBaseConfig`](config::AwsBaseConfig) for
//! region, endpoint override and optional STS assume-role credentials.

pub mod config;
pub mod error;
pub mod memory;
pub mod store;
pub mod types;

#[cfg(feature = "s3")]
pub mod auth;

#[cfg(feature = "s3")]
pub mod s3;

pub use config::{AwsBaseConfig, S3StoreConfig};
pub use error::StorageError;
pub use memory::MemoryObjectStore;
pub use store::ObjectStore;
pub use types::{PutObject, StoredObject};

#[cfg(feature = "s3")]
pub use s3::S3ObjectStore;
