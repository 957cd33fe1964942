//! Sign-up use cases.
//!
//! This module exposes the sign-up orchestrator.

mod context;
mod errors;
pub mod orchestrator;

pub use orchestrator::{SignupOrchestrator, SignupOrchestratorError};
