pub mod builder;
pub mod error;
pub mod fetch;
pub mod gateway;
pub mod metrics;
pub mod stage;
pub mod types;

pub use builder::IngestionGatewayBuilder;
pub use error::IngestError;
pub use fetch::{DocumentFetcher, FetchConfig};
pub use gateway::IngestionGateway;
pub use metrics::{IngestMetrics, MetricsSnapshot};
pub use stage::IngestStage;
pub use types::{IngestReceipt, Upload};
