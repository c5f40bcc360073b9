use serde::Deserialize;

// =======================================================
// ROUTING CONFIG + DEFAULTS
// =======================================================
/// How many hidden routing slices are stacked in front of the handler.
/// Each one strips one leading path segment; 0 leaves lines untouched.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RoutingConfig {
    pub layers: u8,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self { layers: 1 }
    }
}

impl RoutingConfig {
    pub fn layers(&self) -> u8 {
        self.layers
    }
}
