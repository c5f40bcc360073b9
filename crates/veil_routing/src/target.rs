use http::Uri;
use http::uri::{InvalidUri, PathAndQuery};

use crate::rewrite::RewriteError;

/// Longest target `http::Uri` accepts in one piece.
const URI_MAX_LEN: usize = u16::MAX as usize - 1;
/// Piece size used to validate path and query of longer targets.
const CHUNK_LEN: usize = 8 * 1024;

/// Request target cut into the part whose segments get rewritten and the
/// parts that must be reproduced byte for byte.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Target<'a> {
    /// `scheme://authority`, empty for origin-form targets.
    prefix: &'a str,
    path: &'a str,
    /// `?query` and/or `#fragment`.
    suffix: &'a str,
}

impl<'a> Target<'a> {
    /// Validates `raw` as a URI and locates its path.
    ///
    /// `http::Uri` drops fragments while parsing, so the fragment is checked
    /// here against the RFC 3986 grammar and carried along in `suffix`.
    /// Targets past `http::Uri`'s length limit are validated piecewise.
    pub(crate) fn parse(raw: &'a str) -> Result<Self, RewriteError> {
        let (without_fragment, fragment) = match raw.split_once('#') {
            Some((head, fragment)) => (head, Some(fragment)),
            None => (raw, None),
        };
        if fragment.is_some_and(|f| !is_valid_fragment(f)) {
            return Err(RewriteError::InvalidFragment);
        }

        let path_start = if without_fragment.len() <= URI_MAX_LEN {
            let uri: Uri = without_fragment.parse()?;
            if uri.scheme().is_some() {
                authority_end(without_fragment)
            } else {
                0
            }
        } else {
            validate_long(without_fragment)?
        };
        let path_end = without_fragment[path_start..]
            .find('?')
            .map_or(without_fragment.len(), |idx| path_start + idx);

        Ok(Self {
            prefix: &raw[..path_start],
            path: &raw[path_start..path_end],
            suffix: &raw[path_end..],
        })
    }

    pub(crate) fn path(&self) -> &'a str {
        self.path
    }

    /// Serializes the target again with `path` in place of the original one.
    pub(crate) fn with_path(&self, path: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + path.len() + self.suffix.len());
        out.push_str(self.prefix);
        out.push_str(path);
        out.push_str(self.suffix);
        out
    }
}

/// Where the path starts in an absolute-form target (fragment removed).
fn authority_end(target: &str) -> usize {
    let authority_start = target.find("://").map_or(0, |idx| idx + 3);
    target[authority_start..]
        .find(|c| matches!(c, '/' | '?'))
        .map_or(target.len(), |idx| authority_start + idx)
}

/// Validation for targets `http::Uri` refuses on length alone.
///
/// Scheme and authority still go through `Uri`; path and query go through
/// `PathAndQuery` in pieces, so the character rules are the same as for
/// short targets. Only origin-form and absolute-form can be this long.
/// Returns where the path starts.
fn validate_long(target: &str) -> Result<usize, RewriteError> {
    let path_start = if target.starts_with('/') {
        0
    } else {
        let end = authority_end(target);
        let head: Uri = target[..end].parse()?;
        if head.scheme().is_none() {
            return Err(RewriteError::TooLong);
        }
        end
    };

    let rest = &target[path_start..];
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    for chunk in path.as_bytes().chunks(CHUNK_LEN) {
        check_piece(b"/", chunk)?;
    }
    if let Some(query) = query {
        for chunk in query.as_bytes().chunks(CHUNK_LEN) {
            check_piece(b"/?", chunk)?;
        }
    }
    Ok(path_start)
}

fn check_piece(lead: &[u8], chunk: &[u8]) -> Result<(), InvalidUri> {
    let mut piece = Vec::with_capacity(lead.len() + chunk.len());
    piece.extend_from_slice(lead);
    piece.extend_from_slice(chunk);
    PathAndQuery::try_from(piece.as_slice()).map(drop)
}

/// fragment = *( pchar / "/" / "?" ), pct-encoded included.
fn is_valid_fragment(fragment: &str) -> bool {
    let bytes = fragment.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            let hex = |at: usize| bytes.get(at).is_some_and(u8::is_ascii_hexdigit);
            if !(hex(idx + 1) && hex(idx + 2)) {
                return false;
            }
            idx += 3;
        } else if is_fragment_char(bytes[idx]) {
            idx += 1;
        } else {
            return false;
        }
    }
    true
}

fn is_fragment_char(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'.' | b'_' | b'~' // unreserved
                | b'!' | b'$' | b'&' | b'\'' | b'(' | b')'
                | b'*' | b'+' | b',' | b';' | b'=' // sub-delims
                | b':' | b'@' | b'/' | b'?'
        )
}

#[cfg(test)]
mod tests {
    use super::Target;
    use crate::rewrite::RewriteError;

    #[test]
    fn origin_form_has_no_prefix() {
        let target = Target::parse("/one/two?q=1#frag").expect("expected ok");
        assert_eq!(
            target,
            Target {
                prefix: "",
                path: "/one/two",
                suffix: "?q=1#frag",
            }
        );
    }

    #[test]
    fn absolute_form_keeps_scheme_authority_and_port() {
        let target = Target::parse("HTTP://Example.com:8080/a/b").expect("expected ok");
        assert_eq!(target.prefix, "HTTP://Example.com:8080");
        assert_eq!(target.path(), "/a/b");
        assert_eq!(target.suffix, "");
    }

    #[test]
    fn absolute_form_without_path() {
        let target = Target::parse("http://www.w3.org").expect("expected ok");
        assert_eq!(target.prefix, "http://www.w3.org");
        assert_eq!(target.path(), "");
        assert_eq!(target.suffix, "");
    }

    #[test]
    fn slashes_in_query_do_not_count_as_path() {
        let target = Target::parse("/a/b?next=/c/d").expect("expected ok");
        assert_eq!(target.path(), "/a/b");
        assert_eq!(target.with_path("/b"), "/b?next=/c/d");
    }

    #[test]
    fn asterisk_and_authority_forms_parse_without_rooted_path() {
        assert_eq!(Target::parse("*").expect("expected ok").path(), "*");
        assert_eq!(
            Target::parse("example.com:443").expect("expected ok").path(),
            "example.com:443"
        );
    }

    #[test]
    fn fragment_follows_rfc_3986() {
        let target = Target::parse("/a/b#sec/2?x=%20&y=(1)").expect("expected ok");
        assert_eq!(target.path(), "/a/b");
        assert_eq!(target.suffix, "#sec/2?x=%20&y=(1)");
        assert!(Target::parse("http://h#").is_ok());

        for raw in ["/a/b#x#y", "/a/b#\u{1}", "/a/b#has space", "/a/b#%2", "/a/b#%zz"] {
            assert!(
                matches!(Target::parse(raw), Err(RewriteError::InvalidFragment)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn long_origin_form_is_validated_piecewise() {
        let raw = format!("/repo/{}?q={}", "a".repeat(70_000), "b".repeat(20_000));
        let target = Target::parse(&raw).expect("expected ok");
        assert_eq!(target.prefix, "");
        assert_eq!(target.path().len(), 6 + 70_000);
        assert_eq!(target.suffix.len(), 3 + 20_000);
    }

    #[test]
    fn long_absolute_form_keeps_prefix() {
        let raw = format!("https://repo.example:8443/maven/{}", "x".repeat(70_000));
        let target = Target::parse(&raw).expect("expected ok");
        assert_eq!(target.prefix, "https://repo.example:8443");
        assert!(target.path().starts_with("/maven/x"));
    }

    #[test]
    fn long_targets_still_reject_bad_characters() {
        let bad_path = format!("/repo/{}\u{1}", "a".repeat(70_000));
        assert!(matches!(
            Target::parse(&bad_path),
            Err(RewriteError::InvalidUri(_))
        ));

        let bad_query = format!("/repo/a?{}\u{7f}", "q".repeat(70_000));
        assert!(Target::parse(&bad_query).is_err());

        let unrooted = "h".repeat(70_000);
        assert!(Target::parse(&unrooted).is_err());
    }

    #[test]
    fn rejects_invalid_uri() {
        assert!(Target::parse("").is_err());
        assert!(Target::parse("/bad\u{1}char").is_err());
        assert!(Target::parse("relative/path").is_err());
    }
}
