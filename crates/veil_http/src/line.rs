use std::{fmt, str::FromStr};

/// Why a string is not a `METHOD TARGET VERSION` request line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("request line is empty")]
    Empty,
    #[error("request line has no target")]
    MissingTarget,
    #[error("request line has no protocol version")]
    MissingVersion,
    #[error("request line has more than three fields")]
    TrailingFields,
}

/// First line of an HTTP request.
///
/// Serialized as the three fields joined by a single space; no other
/// separator is recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    target: String,
    version: String,
}

impl RequestLine {
    pub fn new(
        method: impl Into<String>,
        target: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            version: version.into(),
        }
    }

    /// Parses a strict three-field line. Fields are split on single spaces,
    /// so a doubled space yields an empty field and is rejected.
    pub fn parse(line: &str) -> Result<Self, LineError> {
        let mut parts = line.split(' ');
        let method = parts
            .next()
            .filter(|m| !m.is_empty())
            .ok_or(LineError::Empty)?;
        let target = parts
            .next()
            .filter(|t| !t.is_empty())
            .ok_or(LineError::MissingTarget)?;
        let version = parts
            .next()
            .filter(|v| !v.is_empty())
            .ok_or(LineError::MissingVersion)?;
        if parts.next().is_some() {
            return Err(LineError::TrailingFields);
        }
        Ok(Self::new(method, target, version))
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl FromStr for RequestLine {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.target, self.version)
    }
}
