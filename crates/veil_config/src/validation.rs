use std::fmt;

use http::{HeaderName, StatusCode};

use crate::VeilConfig;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
const MAX_SENSIBLE_LAYERS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Issues found in a loaded configuration, in the order they were checked.
#[derive(Debug, Default)]
pub struct ConfigReport {
    issues: Vec<(Severity, String)>,
}

impl ConfigReport {
    pub fn is_ok(&self) -> bool {
        !self.has_errors()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &str> {
        self.issues
            .iter()
            .filter(move |(s, _)| *s == severity)
            .map(|(_, msg)| msg.as_str())
    }

    fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.issues.push((severity, message.into()));
    }
}

/// One `error: ...` / `warning: ...` line per issue.
impl fmt::Display for ConfigReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (severity, msg) in &self.issues {
            let tag = match severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            writeln!(f, "  {tag}: {msg}")?;
        }
        Ok(())
    }
}

/// Validate a Veil configuration and return a report of issues.
pub(crate) fn validate(cfg: &VeilConfig) -> ConfigReport {
    let mut report = ConfigReport::default();

    validate_global(cfg, &mut report);
    validate_routing(cfg, &mut report);
    validate_echo(cfg, &mut report);

    report
}

fn validate_global(cfg: &VeilConfig, report: &mut ConfigReport) {
    let level = cfg.global.log_level.trim();
    if !LOG_LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level)) {
        report.push(
            Severity::Error,
            format!(
                "global.log_level '{level}' is not one of {}",
                LOG_LEVELS.join(", ")
            ),
        );
    }
}

fn validate_routing(cfg: &VeilConfig, report: &mut ConfigReport) {
    let layers = cfg.routing.layers;
    if layers == 0 {
        report.push(
            Severity::Warning,
            "routing.layers is 0; request lines are passed through unchanged",
        );
    } else if layers > MAX_SENSIBLE_LAYERS {
        report.push(
            Severity::Warning,
            format!("routing.layers is {layers}; more than {MAX_SENSIBLE_LAYERS} hidden segments is unusual"),
        );
    }
}

fn validate_echo(cfg: &VeilConfig, report: &mut ConfigReport) {
    if HeaderName::from_bytes(cfg.echo.header.as_bytes()).is_err() {
        report.push(
            Severity::Error,
            format!("echo.header '{}' is not a valid HTTP header name", cfg.echo.header),
        );
    }
    if StatusCode::from_u16(cfg.echo.status).is_err() {
        report.push(
            Severity::Error,
            format!("echo.status {} is not a valid HTTP status code", cfg.echo.status),
        );
    }
}
