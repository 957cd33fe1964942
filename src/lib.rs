//! LearnHub terminal client: bootstrap and the interactive front end.

pub mod bootstrap;
pub mod cli;

pub use bootstrap::run_app;
pub use cli::Cli;
