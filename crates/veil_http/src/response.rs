use std::fmt;

use http::{HeaderName, HeaderValue, StatusCode};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_stream::StreamExt;
use tracing::debug;

use crate::{Body, Headers, body};

/// Header that cannot be put on the wire as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeadError {
    #[error("invalid header name {0:?}")]
    InvalidName(String),
    /// Value with CR, LF or another control character.
    #[error("invalid value for header {0:?}")]
    InvalidValue(String),
}

/// Response produced by a slice. Nothing is written until [`Response::write_to`].
pub struct Response {
    status: StatusCode,
    headers: Headers,
    body: Body,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: body::empty(),
        }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Appends a header. Existing headers with the same name are kept.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn into_parts(self) -> (StatusCode, Headers, Body) {
        (self.status, self.headers, self.body)
    }

    /// Checks every header the way `http` would accept it, so nothing
    /// smuggled into a name or value can split the response head.
    pub fn validate_head(&self) -> Result<(), HeadError> {
        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HeadError::InvalidName(name.clone()))?;
            HeaderValue::from_bytes(value.as_bytes())
                .map_err(|_| HeadError::InvalidValue(name.clone()))?;
        }
        Ok(())
    }

    /// Sends the response as HTTP/1.1.
    ///
    /// - Fails with [`HeadError`] before writing anything if a header
    ///   does not pass [`Response::validate_head`]
    /// - Status line + headers in their original order
    /// - With a `Content-Length` header the body goes out as-is
    /// - Without one, `Transfer-Encoding: chunked` is added and every
    ///   body chunk is framed as it is pulled from the stream
    pub async fn write_to<W>(self, out: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        self.validate_head()?;

        let Response {
            status,
            headers,
            mut body,
        } = self;

        let chunked = !headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-length"));

        let mut head = format!(
            "HTTP/1.1 {} {}\r\n",
            status.as_str(),
            status.canonical_reason().unwrap_or("")
        );
        for (name, value) in &headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        if chunked {
            head.push_str("Transfer-Encoding: chunked\r\n");
        }
        head.push_str("\r\n");
        out.write_all(head.as_bytes()).await?;

        let mut sent = 0usize;
        while let Some(chunk) = body.next().await {
            // a zero-size chunk would terminate the chunked stream early
            if chunk.is_empty() {
                continue;
            }
            if chunked {
                out.write_all(format!("{:x}\r\n", chunk.len()).as_bytes())
                    .await?;
                out.write_all(&chunk).await?;
                out.write_all(b"\r\n").await?;
            } else {
                out.write_all(&chunk).await?;
            }
            sent += chunk.len();
        }
        if chunked {
            out.write_all(b"0\r\n\r\n").await?;
        }
        out.flush().await?;

        debug!(
            target: "veil::http",
            status = status.as_u16(),
            chunked,
            body_bytes = sent,
            "Response sent"
        );
        Ok(())
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
