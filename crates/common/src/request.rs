//! Loose classification of a raw request buffer.
//!
//! The match is deliberately permissive: the method token and ` HTTP/1.1`
//! may appear anywhere in the buffer, not only on the request line.

/// Method token for a start-page request.
pub const GET_TOKEN: &[u8] = b"GET ";
/// Method token for a form submission.
pub const POST_TOKEN: &[u8] = b"POST ";
/// Protocol token required alongside either method token.
pub const PROTOCOL_TOKEN: &[u8] = b" HTTP/1.1";
/// Blank line between headers and body.
pub const BODY_SEPARATOR: &[u8] = b"\r\n\r\n";

/// Result of inspecting one received buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Get,
    /// `body_offset` is the index just past the first blank line, or `None`
    /// if the buffer has no header/body separator.
    Post { body_offset: Option<usize> },
    Unrecognized,
}

/// Classify `raw`. `GET` is checked before `POST`.
pub fn classify(raw: &[u8]) -> Classification {
    if !contains(raw, PROTOCOL_TOKEN) {
        return Classification::Unrecognized;
    }
    if contains(raw, GET_TOKEN) {
        return Classification::Get;
    }
    if contains(raw, POST_TOKEN) {
        let body_offset = find_subslice(raw, BODY_SEPARATOR).map(|i| i + BODY_SEPARATOR.len());
        return Classification::Post { body_offset };
    }
    Classification::Unrecognized
}

/// Index of the first occurrence of `needle` in `haystack`.
///
/// An empty needle matches at index 0.
pub fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find_subslice(haystack, needle).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_get() {
        assert_eq!(classify(b"GET / HTTP/1.1\r\n\r\n"), Classification::Get);
    }

    #[test]
    fn classifies_post_with_body() {
        let raw = b"POST / HTTP/1.1\r\nHost: x\r\n\r\ntext=a";
        let Classification::Post { body_offset: Some(off) } = classify(raw) else {
            panic!("expected POST with body");
        };
        assert_eq!(&raw[off..], b"text=a");
    }

    #[test]
    fn post_without_separator_has_no_body() {
        assert_eq!(
            classify(b"POST / HTTP/1.1\r\nHost: x\r\n"),
            Classification::Post { body_offset: None }
        );
    }

    #[test]
    fn post_with_empty_body() {
        let raw = b"POST / HTTP/1.1\r\n\r\n";
        assert_eq!(
            classify(raw),
            Classification::Post {
                body_offset: Some(raw.len())
            }
        );
    }

    #[test]
    fn requires_protocol_token() {
        assert_eq!(classify(b"GET / HTTP/1.0\r\n\r\n"), Classification::Unrecognized);
        assert_eq!(classify(b"POST /\r\n\r\n"), Classification::Unrecognized);
    }

    #[test]
    fn tokens_may_appear_anywhere() {
        assert_eq!(classify(b"junk\r\nGET / HTTP/1.1\r\n\r\n"), Classification::Get);
        let raw = b"X-Note: POST  HTTP/1.1\r\n\r\n";
        assert_eq!(
            classify(raw),
            Classification::Post {
                body_offset: Some(raw.len())
            }
        );
    }

    #[test]
    fn get_wins_over_post() {
        assert_eq!(classify(b"POST / HTTP/1.1\r\nX: GET \r\n\r\n"), Classification::Get);
    }

    #[test]
    fn unrecognized_noise() {
        assert_eq!(classify(b"hello there"), Classification::Unrecognized);
        assert_eq!(classify(b""), Classification::Unrecognized);
        assert_eq!(classify(b"PUT / HTTP/1.1\r\n\r\n"), Classification::Unrecognized);
    }

    #[test]
    fn find_subslice_basics() {
        assert_eq!(find_subslice(b"abcabc", b"ca"), Some(2));
        assert_eq!(find_subslice(b"ab", b"abc"), None);
        assert_eq!(find_subslice(b"ab", b""), Some(0));
    }
}
