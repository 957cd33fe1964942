pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{default_config_path, load_config, load_config_if_present};
pub use run::run_app;
pub use wiring::{wire_dependencies, AppDeps, ResolvedSettings, WiringError};
