//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! external dependencies.

pub mod account_service;
mod clock;
pub mod cooldown_timer;
pub mod errors;
mod signup_event_port;
pub mod token_store;

pub use account_service::AccountServicePort;
pub use clock::*;
pub use cooldown_timer::CooldownTimerPort;
pub use errors::{AccountServiceError, TokenStoreError};
pub use signup_event_port::SignupEventPort;
pub use token_store::{StoredToken, TokenStorePort};
