/// Language used when the client does not send `Accept-Language`.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Resolve the preferred language from an `Accept-Language` header value.
///
/// The header is passed through as-is (trimmed); quality values are not
/// parsed. Absent, empty and whitespace-only headers fall back to
/// [`DEFAULT_LANGUAGE`].
#[must_use]
pub fn preferred_language(header: Option<&str>) -> String {
    header
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_owned()
}
