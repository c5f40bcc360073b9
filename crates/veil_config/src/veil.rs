use serde::Deserialize;

use crate::validation::{ConfigReport, validate};
use crate::{EchoConfig, GlobalConfig, RoutingConfig};

// =======================================================
// VEIL CONFIG — main config
// =======================================================
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct VeilConfig {
    #[serde(default)]
    pub global: GlobalConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub echo: EchoConfig,
}

impl Default for VeilConfig {
    fn default() -> Self {
        let mut cfg = Self {
            global: GlobalConfig::default(),
            routing: RoutingConfig::default(),
            echo: EchoConfig::default(),
        };
        cfg.apply_defaults();
        cfg
    }
}

impl VeilConfig {
    pub fn global(&self) -> &GlobalConfig {
        &self.global
    }

    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    pub fn echo(&self) -> &EchoConfig {
        &self.echo
    }

    /// Validate the configuration and return a report of warnings and errors.
    pub fn validate(&self) -> ConfigReport {
        validate(self)
    }

    pub fn from_file(file_name: &str) -> Result<Self, config::ConfigError> {
        let built = config::Config::builder()
            .add_source(config::File::new(file_name, config::FileFormat::Ini).required(false))
            .build()?;
        Self::build(built)
    }

    pub fn from_ini(content: &str) -> Result<Self, config::ConfigError> {
        let built = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Ini))
            .build()?;
        Self::build(built)
    }

    fn build(built: config::Config) -> Result<Self, config::ConfigError> {
        let mut cfg: VeilConfig = built.try_deserialize()?;
        cfg.apply_defaults();
        Ok(cfg)
    }

    /// Loads `file_name`, or the defaults when it cannot be read or does
    /// not validate. Problems are reported on stderr.
    pub fn from_file_or_default(file_name: &str) -> Self {
        let loaded = Self::from_file(file_name)
            .map_err(|e| format!("  error: {e}\n"))
            .and_then(|cfg| {
                let report = cfg.validate();
                if report.has_errors() {
                    return Err(report.to_string());
                }
                if report.warnings().next().is_some() {
                    eprint!("veil: '{file_name}' loaded with warnings:\n{report}");
                }
                Ok(cfg)
            });

        loaded.unwrap_or_else(|problems| {
            eprint!("veil: '{file_name}' not usable, running with defaults:\n{problems}");
            Self::default()
        })
    }

    fn apply_defaults(&mut self) {
        let def_global = GlobalConfig::default();
        self.global.apply_defaults_from(&def_global);

        let def_echo = EchoConfig::default();
        self.echo.apply_defaults_from(&def_echo);
    }

    /// Dumps the effective configuration to stderr.
    pub fn print(&self) {
        eprintln!("================ VEIL CONFIG =================");
        eprintln!("[global]");
        eprintln!("  log_level = {}", self.global.log_level);
        eprintln!("[routing]");
        eprintln!("  layers    = {}", self.routing.layers);
        eprintln!("[echo]");
        eprintln!("  header    = {}", self.echo.header);
        eprintln!("  status    = {}", self.echo.status);
        eprintln!("==============================================");
    }
}
