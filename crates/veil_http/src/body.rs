use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use tokio_stream::{Stream, StreamExt};

/// Body of a request or response: a stream of byte chunks.
///
/// Slices that do not look at the body just move it along, so
/// backpressure stays with whoever eventually polls it.
pub type Body = Pin<Box<dyn Stream<Item = Bytes> + Send>>;

pub fn empty() -> Body {
    Box::pin(tokio_stream::empty())
}

pub fn from_bytes(data: impl Into<Bytes>) -> Body {
    Box::pin(tokio_stream::once(data.into()))
}

pub fn from_chunks(chunks: Vec<Bytes>) -> Body {
    Box::pin(tokio_stream::iter(chunks))
}

/// Drains a body into a single buffer. Meant for small bodies and tests.
pub async fn collect(mut body: Body) -> Bytes {
    let mut out = BytesMut::new();
    while let Some(chunk) = body.next().await {
        out.extend_from_slice(&chunk);
    }
    out.freeze()
}
