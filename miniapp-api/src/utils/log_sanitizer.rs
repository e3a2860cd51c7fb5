//! Log sanitization utilities
//!
//! Keeps auth tokens and oversized response bodies (base64 QR codes, long room
//! ledgers) out of debug logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Header names whose values are never logged in clear.
const SENSITIVE_HEADERS: [&str; 3] = ["authorization", "token", "cookie"];

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the first
/// `TRUNCATE_LIMIT` bytes (on a char boundary) with a suffix giving the total
/// length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Header value as it may appear in logs: auth-bearing headers are masked.
pub fn mask_header_value(name: &str, value: &str) -> String {
    if SENSITIVE_HEADERS
        .iter()
        .any(|h| name.eq_ignore_ascii_case(h))
    {
        format!("*** ({} chars)", value.chars().count())
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_unchanged() {
        let s = r#"{"code":200}"#;
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(TRUNCATE_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains(&format!("total {} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        let s = "账".repeat(200);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn auth_headers_masked() {
        assert_eq!(mask_header_value("Authorization", "Bearer abc"), "*** (10 chars)");
        assert_eq!(mask_header_value("TOKEN", "abc"), "*** (3 chars)");
        assert_eq!(mask_header_value("source-client", "miniapp"), "miniapp");
    }
}
