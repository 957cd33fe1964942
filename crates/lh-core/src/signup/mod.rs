//! Sign-up domain module.
//!
//! This module defines the registration wizard: its step registry, the
//! in-memory session, the pure state machine and the field validation rules.

pub mod action;
pub mod error;
pub mod event;
pub mod session;
pub mod state;
pub mod state_machine;
pub mod step;
pub mod validation;

pub use action::SignupAction;
pub use error::{FieldError, SignupError, SignupField, SignupNotice};
pub use event::SignupEvent;
pub use session::RegistrationSession;
pub use state::SignupState;
pub use state_machine::SignupStateMachine;
pub use step::SignupStep;
pub use validation::{PasswordStrength, ValidationResult};
