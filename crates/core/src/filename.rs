/// Content type recorded when an upload does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type for documents fetched by URL.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Turn a free-form document title into a storage-safe `.pdf` file name.
///
/// Every character outside `[A-Za-z0-9.-]` becomes `_`, one replacement per
/// `char`.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    let mut name: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    name.push_str(".pdf");
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_safe_characters() {
        assert_eq!(sanitize_title("rfc-9110.v2"), "rfc-9110.v2.pdf");
    }

    #[test]
    fn replaces_spaces_and_punctuation() {
        assert_eq!(
            sanitize_title("Attention Is All You Need!"),
            "Attention_Is_All_You_Need_.pdf"
        );
        assert_eq!(sanitize_title("a/b\\c"), "a_b_c.pdf");
    }

    #[test]
    fn replaces_non_ascii_per_char() {
        assert_eq!(sanitize_title("Ação"), "A__o.pdf");
    }
}
