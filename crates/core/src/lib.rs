pub mod digest;
pub mod event;
pub mod filename;
pub mod identity;
pub mod locale;

pub use digest::{ContentDigest, storage_key};
pub use event::{INGESTION_TOPIC, IngestionEvent};
pub use filename::{DEFAULT_CONTENT_TYPE, PDF_CONTENT_TYPE, sanitize_title};
pub use identity::{MalformedToken, TokenClaim, resolve_user_id};
pub use locale::{DEFAULT_LANGUAGE, preferred_language};
