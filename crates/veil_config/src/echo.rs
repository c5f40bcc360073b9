use serde::Deserialize;

// =======================================================
// ECHO CONFIG + DEFAULTS
// =======================================================
/// The echo handler answers every request with `status` and puts the
/// request line it received into the `header` response header.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EchoConfig {
    pub header: String,
    pub status: u16,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            header: "line".into(),
            status: 200,
        }
    }
}

impl EchoConfig {
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub(crate) fn apply_defaults_from(&mut self, defaults: &EchoConfig) {
        if self.header.trim().is_empty() {
            self.header = defaults.header.clone();
        }
        if self.status == 0 {
            self.status = defaults.status;
        }
    }
}
