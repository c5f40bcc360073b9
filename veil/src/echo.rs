use http::{HeaderName, StatusCode};
use veil_config::EchoConfig;
use veil_http::{Body, Headers, Response, Slice};

/// Terminal slice: answers with the request line it was given.
///
/// The line goes into the configured header, request headers are copied
/// after it and the request body is streamed back as the response body.
#[derive(Debug, Clone)]
pub(crate) struct EchoSlice {
    header: String,
    status: StatusCode,
}

impl EchoSlice {
    pub(crate) fn new(cfg: &EchoConfig) -> anyhow::Result<Self> {
        HeaderName::from_bytes(cfg.header().as_bytes())?;
        Ok(Self {
            header: cfg.header().to_string(),
            status: StatusCode::from_u16(cfg.status())?,
        })
    }
}

impl Slice for EchoSlice {
    fn response(&self, line: &str, headers: Headers, body: Body) -> Response {
        Response::new(self.status)
            .with_header(self.header.as_str(), line)
            .with_headers(headers)
            .with_body(body)
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use veil_config::EchoConfig;
    use veil_http::{Slice, body};

    use super::EchoSlice;

    #[test]
    fn echoes_line_and_headers() {
        let cfg = EchoConfig {
            header: "X-Line".into(),
            status: 202,
        };
        let echo = EchoSlice::new(&cfg).expect("expected ok");
        let rs = echo.response(
            "GET /a HTTP/1.1",
            vec![("Host".into(), "example".into())],
            body::empty(),
        );
        assert_eq!(rs.status(), StatusCode::ACCEPTED);
        assert_eq!(rs.header("x-line"), Some("GET /a HTTP/1.1"));
        assert_eq!(rs.header("host"), Some("example"));
    }

    #[test]
    fn rejects_invalid_settings() {
        let bad_header = EchoConfig {
            header: "not a header".into(),
            status: 200,
        };
        assert!(EchoSlice::new(&bad_header).is_err());

        let bad_status = EchoConfig {
            header: "line".into(),
            status: 42,
        };
        assert!(EchoSlice::new(&bad_status).is_err());
    }
}
