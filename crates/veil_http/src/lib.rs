//! Request/response plumbing shared by every slice in the workspace.
//!
//! A slice takes a raw request line, an ordered header sequence and a body
//! stream, and hands back a [`Response`] that can be sent later.

pub mod body;
pub mod line;
pub mod response;
pub mod slice;

pub use body::Body;
pub use line::{LineError, RequestLine};
pub use response::{HeadError, Response};
pub use slice::{FnSlice, Slice, from_fn};

/// Ordered header sequence. Order and duplicates are significant.
pub type Headers = Vec<(String, String)>;
