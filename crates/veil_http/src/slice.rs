use std::sync::Arc;

use crate::{Body, Headers, Response};

/// A unit that turns a request into a response.
///
/// Middlewares are slices that hold the next slice and delegate to it,
/// so chains are built by nesting.
pub trait Slice: Send + Sync {
    fn response(&self, line: &str, headers: Headers, body: Body) -> Response;
}

impl<S: Slice + ?Sized> Slice for Box<S> {
    fn response(&self, line: &str, headers: Headers, body: Body) -> Response {
        (**self).response(line, headers, body)
    }
}

impl<S: Slice + ?Sized> Slice for Arc<S> {
    fn response(&self, line: &str, headers: Headers, body: Body) -> Response {
        (**self).response(line, headers, body)
    }
}

/// Slice backed by a closure. See [`from_fn`].
#[derive(Clone, Copy, Debug)]
pub struct FnSlice<F> {
    f: F,
}

/// Wraps a closure as a [`Slice`].
pub fn from_fn<F>(f: F) -> FnSlice<F>
where
    F: Fn(&str, Headers, Body) -> Response + Send + Sync,
{
    FnSlice { f }
}

impl<F> Slice for FnSlice<F>
where
    F: Fn(&str, Headers, Body) -> Response + Send + Sync,
{
    fn response(&self, line: &str, headers: Headers, body: Body) -> Response {
        (self.f)(line, headers, body)
    }
}
