//! LearnHub Application Orchestration Layer
//!
//! This crate contains the sign-up step controller and the authentication
//! context. It reaches the outside world only through `lh-core` ports.

pub mod usecases;

pub use usecases::auth::{AuthContext, AuthError, LoginUser, LogoutUser};
pub use usecases::signup::{SignupOrchestrator, SignupOrchestratorError};
