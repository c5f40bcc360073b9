mod echo;
mod global;
mod routing;
mod validation;
mod veil;

pub use echo::EchoConfig;
pub use global::GlobalConfig;
pub use routing::RoutingConfig;
pub use validation::{ConfigReport, Severity};
pub use veil::VeilConfig;
