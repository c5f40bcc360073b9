use tracing::{debug, trace};
use veil_http::{Body, Headers, Response, Slice};

use crate::rewrite::rewrite_request_line;

/// Slice that removes the first path segment from the request target
/// before delegating, e.g. `GET /repo/a/b HTTP/1.1` -> `GET /a/b HTTP/1.1`.
///
/// Lines that cannot be rewritten (no target, invalid URI, nothing to
/// strip) reach the delegate unchanged. Headers and body are moved
/// through untouched and the delegate's response is returned as-is.
#[derive(Debug, Clone)]
pub struct HiddenRoutingSlice<S> {
    slice: S,
}

impl<S: Slice> HiddenRoutingSlice<S> {
    pub fn new(slice: S) -> Self {
        Self { slice }
    }

    pub fn get_ref(&self) -> &S {
        &self.slice
    }

    pub fn into_inner(self) -> S {
        self.slice
    }
}

impl<S: Slice> Slice for HiddenRoutingSlice<S> {
    fn response(&self, line: &str, headers: Headers, body: Body) -> Response {
        match rewrite_request_line(line) {
            Ok(rewritten) => {
                trace!(
                    target: "veil::routing",
                    original = %line,
                    %rewritten,
                    "Stripped first path segment"
                );
                self.slice.response(&rewritten, headers, body)
            }
            Err(err) => {
                debug!(
                    target: "veil::routing",
                    %line,
                    reason = %err,
                    "Request line passed through unchanged"
                );
                self.slice.response(line, headers, body)
            }
        }
    }
}
