/// =======================================================
/// PATH REWRITE: drop the first segment
/// =======================================================
///
/// `/repo/a/b` -> `/a/b`
///
/// - The path is split on '/', segment 0 is the empty string
///   before the leading slash
/// - Segment 1 is removed only if something follows it, so
///   `/repo` stays `/repo` and `/repo/` becomes `/`
/// - Everything after segment 1 is kept verbatim (empty
///   segments and trailing slash included)
///
/// Returns `None` when there is nothing to strip.
pub fn strip_first_segment(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = path.split('/').collect();

    // not rooted: "*", "host:443", ""
    if segments.len() < 3 || !segments[0].is_empty() {
        return None;
    }

    segments.remove(1);
    Some(segments.join("/"))
}
