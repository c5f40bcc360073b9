use http::uri::InvalidUri;

use crate::path::strip_first_segment;
use crate::target::Target;

/// Why a request line was not rewritten.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// Fewer than two space-separated fields.
    #[error("request line has no target")]
    MissingTarget,
    /// Target rejected by the URI parser.
    #[error("request target is not a valid URI: {0}")]
    InvalidUri(#[from] InvalidUri),
    /// Fragment outside the RFC 3986 fragment grammar.
    #[error("request target has an invalid fragment")]
    InvalidFragment,
    /// Target past the URI parser's length limit that is neither
    /// origin-form nor absolute-form.
    #[error("request target is too long")]
    TooLong,
    /// Path has no segment after the first one.
    #[error("request path has no segment to strip")]
    NoSegmentToStrip,
}

/// Removes the first path segment from the target of `line`.
///
/// Only field 1 (fields are split on single spaces) is touched; the method,
/// the version and any extra fields are copied through, as are the target's
/// scheme, authority, query and fragment.
pub fn rewrite_request_line(line: &str) -> Result<String, RewriteError> {
    let (method, rest) = line.split_once(' ').ok_or(RewriteError::MissingTarget)?;
    let (raw_target, tail) = match rest.split_once(' ') {
        Some((target, tail)) => (target, Some(tail)),
        None => (rest, None),
    };

    let target = Target::parse(raw_target)?;
    let path = strip_first_segment(target.path()).ok_or(RewriteError::NoSegmentToStrip)?;

    let mut out = String::with_capacity(line.len());
    out.push_str(method);
    out.push(' ');
    out.push_str(&target.with_path(&path));
    if let Some(tail) = tail {
        out.push(' ');
        out.push_str(tail);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{RewriteError, rewrite_request_line};

    #[test]
    fn rewrites_origin_form() {
        assert_eq!(
            rewrite_request_line("GET /one/two/three HTTP/1.1").expect("expected ok"),
            "GET /two/three HTTP/1.1"
        );
    }

    #[test]
    fn rewrites_absolute_form() {
        assert_eq!(
            rewrite_request_line("GET http://www.w3.org/pub/WWW/TheProject.html HTTP/1.1")
                .expect("expected ok"),
            "GET http://www.w3.org/WWW/TheProject.html HTTP/1.1"
        );
    }

    #[test]
    fn keeps_port_query_and_fragment() {
        assert_eq!(
            rewrite_request_line("PUT https://repo.example:8443/maven/org/lib.jar?v=1&x=/y#top HTTP/1.1")
                .expect("expected ok"),
            "PUT https://repo.example:8443/org/lib.jar?v=1&x=/y#top HTTP/1.1"
        );
    }

    #[test]
    fn keeps_extra_fields() {
        assert_eq!(
            rewrite_request_line("GET /a/b HTTP/1.1 trailing").expect("expected ok"),
            "GET /b HTTP/1.1 trailing"
        );
    }

    #[test]
    fn two_fields_are_enough() {
        assert_eq!(
            rewrite_request_line("GET /a/b").expect("expected ok"),
            "GET /b"
        );
    }

    #[test]
    fn bare_host_has_nothing_to_strip() {
        let err = rewrite_request_line("GET http://www.w3.org HTTP/1.1").unwrap_err();
        assert!(matches!(err, RewriteError::NoSegmentToStrip));
    }

    #[test]
    fn single_segment_has_nothing_to_strip() {
        let err = rewrite_request_line("GET /one HTTP/1.1").unwrap_err();
        assert!(matches!(err, RewriteError::NoSegmentToStrip));
    }

    #[test]
    fn missing_target() {
        let err = rewrite_request_line("GET").unwrap_err();
        assert!(matches!(err, RewriteError::MissingTarget));
        let err = rewrite_request_line("").unwrap_err();
        assert!(matches!(err, RewriteError::MissingTarget));
    }

    #[test]
    fn invalid_fragment() {
        let err = rewrite_request_line("GET /a/b#x#y HTTP/1.1").unwrap_err();
        assert!(matches!(err, RewriteError::InvalidFragment));
        let err = rewrite_request_line("GET /a/b#\u{1} HTTP/1.1").unwrap_err();
        assert!(matches!(err, RewriteError::InvalidFragment));
    }

    #[test]
    fn long_target_is_still_stripped() {
        let tail = "a".repeat(70_000);
        let line = format!("GET /repo/{tail}?page=2 HTTP/1.1");
        assert_eq!(
            rewrite_request_line(&line).expect("expected ok"),
            format!("GET /{tail}?page=2 HTTP/1.1")
        );
    }

    #[test]
    fn invalid_target() {
        let err = rewrite_request_line("GET  /a/b HTTP/1.1").unwrap_err();
        assert!(matches!(err, RewriteError::InvalidUri(_)));
        let err = rewrite_request_line("GET not/a/uri HTTP/1.1").unwrap_err();
        assert!(matches!(err, RewriteError::InvalidUri(_)));
    }
}
