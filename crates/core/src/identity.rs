//! Best-effort user identification from an `Authorization` header.
//!
//! **This is not authentication.** The token signature and expiry are never
//! checked; the gateway in front of this service is trusted to have done
//! that. The value produced here is a display label for the ingestion event
//! and must never be used to make an access decision.
//!
//! Every failure mode degrades to a sentinel string instead of an error, so a
//! bad token can never abort an upload.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

/// Unpadded base64url that ignores non-zero trailing bits in the last symbol,
/// as lenient JWT decoders do.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// Sentinel for a request without credentials.
pub const ANONYMOUS: &str = "anonymous";
/// Sentinel for a header that is not `<scheme> <token>`.
pub const INVALID_TOKEN: &str = "invalid-token";
/// Sentinel for a token without a payload segment.
pub const INVALID_JWT: &str = "invalid-jwt";
/// Sentinel for a payload segment that is not unpadded base64url.
pub const DECODE_ERROR: &str = "decode-error";
/// Sentinel for a payload without a usable user claim.
pub const UNKNOWN: &str = "unknown";

/// Why a token could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedToken {
    /// The header is not exactly `<scheme> <token>`.
    InvalidScheme,
    /// The token has fewer than two dot-separated segments.
    InvalidJwt,
    /// The payload segment is not valid unpadded base64url.
    DecodeError,
}

impl MalformedToken {
    /// Sentinel user id for this failure.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidScheme => INVALID_TOKEN,
            Self::InvalidJwt => INVALID_JWT,
            Self::DecodeError => DECODE_ERROR,
        }
    }
}

/// Outcome of reading the user claim out of an unverified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenClaim {
    /// `preferred_username` or `sub` claim.
    Value(String),
    /// No `Authorization` header (or an empty one).
    Anonymous,
    /// The header or token structure could not be read.
    Malformed(MalformedToken),
    /// The payload decoded but is not a JSON object or has no user claim.
    Unknown,
}

impl TokenClaim {
    /// Read the user claim from an `Authorization` header value.
    #[must_use]
    pub fn from_authorization(header: &str) -> Self {
        if header.is_empty() {
            return Self::Anonymous;
        }

        let parts: Vec<&str> = header.split(' ').collect();
        let [_scheme, token] = parts.as_slice() else {
            return Self::Malformed(MalformedToken::InvalidScheme);
        };

        let mut segments = token.split('.');
        let (Some(_header), Some(payload)) = (segments.next(), segments.next()) else {
            return Self::Malformed(MalformedToken::InvalidJwt);
        };

        // Line breaks inside the segment are skipped, not treated as errors.
        let payload: String = payload.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        let Ok(decoded) = PAYLOAD_ENGINE.decode(payload) else {
            return Self::Malformed(MalformedToken::DecodeError);
        };

        let Ok(claims) = serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(&decoded)
        else {
            return Self::Unknown;
        };

        ["preferred_username", "sub"]
            .iter()
            .find_map(|name| claims.get(*name).and_then(serde_json::Value::as_str))
            .map_or(Self::Unknown, |value| Self::Value(value.to_owned()))
    }

    /// Collapse the outcome into the user id string recorded on events.
    #[must_use]
    pub fn into_user_id(self) -> String {
        match self {
            Self::Value(value) => value,
            Self::Anonymous => ANONYMOUS.to_owned(),
            Self::Malformed(kind) => kind.as_str().to_owned(),
            Self::Unknown => UNKNOWN.to_owned(),
        }
    }
}

/// Resolve a user id from an `Authorization` header value.
///
/// See the module docs: the result is untrusted.
#[must_use]
pub fn resolve_user_id(header: &str) -> String {
    TokenClaim::from_authorization(header).into_user_id()
}
