//! Hidden routing.
//!
//! An outer path segment (repository, tenant...) is used upstream to pick
//! where a request goes, and must disappear before the request reaches a
//! handler that serves paths relative to its own root:
//!
//! `GET http://www.w3.org/pub/WWW/TheProject.html HTTP/1.1`
//! reaches the wrapped slice as
//! `GET http://www.w3.org/WWW/TheProject.html HTTP/1.1`.

mod path;
mod rewrite;
mod slice;
mod target;

pub use path::strip_first_segment;
pub use rewrite::{RewriteError, rewrite_request_line};
pub use slice::HiddenRoutingSlice;
