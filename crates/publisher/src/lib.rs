//! Event publishing for ingestion events.
//!
//! - [`MemoryPublisher`] records messages in order (dev/test)
//! - `KafkaPublisher` (`kafka` feature) produces to a Kafka cluster,
//!   optionally over `SASL_SSL`

pub mod config;
pub mod error;
pub mod memory;
pub mod publisher;

#[cfg(feature = "kafka")]
pub mod kafka;

pub use config::KafkaConfig;
pub use error::PublishError;
pub use memory::MemoryPublisher;
pub use publisher::{Delivery, EventPublisher, OutboundRecord};

#[cfg(feature = "kafka")]
pub use kafka::KafkaPublisher;
