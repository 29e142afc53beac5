//! Content digests for uploaded documents.
//!
//! A digest identifies a document by its bytes alone. It doubles as the
//! deduplication handle exposed to clients and as the directory component of
//! the storage key.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Prefix under which every uploaded object is stored.
pub const UPLOAD_PREFIX: &str = "uploads";

/// Lowercase hex-encoded SHA-256 digest of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String))]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Length of the hex form of a 256-bit digest.
    pub const HEX_LEN: usize = 64;

    /// Hash `bytes` with SHA-256.
    ///
    /// Only the bytes contribute; file name, content type and any other
    /// request metadata are deliberately not part of the input.
    #[must_use]
    pub fn compute(bytes: &[u8]) -> Self {
        let hash = Sha256::digest(bytes);
        Self(hex::encode(hash))
    }

    /// Return the hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key for a document with this digest and the given file name.
    #[must_use]
    pub fn storage_key(&self, file_name: &str) -> String {
        storage_key(self.as_str(), file_name)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ContentDigest> for String {
    fn from(digest: ContentDigest) -> Self {
        digest.0
    }
}

/// Build the storage key `uploads/<digest>/<file_name>`.
///
/// The file name is used verbatim. It is client-supplied and untrusted, so
/// callers that care about key hygiene must sanitize it first.
#[must_use]
pub fn storage_key(digest: &str, file_name: &str) -> String {
    format!("{UPLOAD_PREFIX}/{digest}/{file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let a = ContentDigest::compute(b"the same bytes");
        let b = ContentDigest::compute(b"the same bytes");
        assert_eq!(a, b);
    }

    #[test]
    fn digest_is_64_lowercase_hex_chars() {
        let digest = ContentDigest::compute(b"%PDF-1.7 fake document");
        assert_eq!(digest.as_str().len(), ContentDigest::HEX_LEN);
        assert!(
            digest
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn digest_of_empty_input_matches_known_value() {
        let digest = ContentDigest::compute(b"");
        assert_eq!(
            digest.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn different_bytes_give_different_digests() {
        let a = ContentDigest::compute(b"chapter one");
        let b = ContentDigest::compute(b"chapter two");
        assert_ne!(a, b);
    }

    #[test]
    fn storage_key_layout() {
        let digest = ContentDigest::compute(b"abc");
        assert_eq!(
            digest.storage_key("notes.pdf"),
            format!("uploads/{digest}/notes.pdf")
        );
    }

    #[test]
    fn storage_key_keeps_file_name_verbatim() {
        assert_eq!(
            storage_key("ff00", "my report (final).pdf"),
            "uploads/ff00/my report (final).pdf"
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let digest = ContentDigest::compute(b"abc");
        let json = serde_json::to_value(&digest).unwrap();
        assert_eq!(json, serde_json::Value::String(digest.to_string()));
    }
}
