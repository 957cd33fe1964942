//! # lh-core
//!
//! Core domain models and business logic for the LearnHub sign-up flow.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod account;
pub mod config;
pub mod ids;
pub mod ports;
pub mod security;
pub mod signup;

// Re-export commonly used types at the crate root
pub use account::{ProfileDraft, Role, RoleProfile};
pub use config::AppConfig;
pub use ids::UserId;
pub use security::SecretString;
pub use signup::{SignupState, SignupStep};
