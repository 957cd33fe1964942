//! Errors, field feedback and notices surfaced by the sign-up flow.

use serde::{Deserialize, Serialize};

use crate::account::Role;

/// Input field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignupField {
    Role,
    Email,
    Password,
    ConfirmPassword,
    VerificationCode,
    FullName,
    Grade,
    ExperienceYears,
    Bio,
}

/// Client-side validation failure local to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: SignupField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: SignupField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Flow-level error. The flow always holds its position when one is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignupError {
    RoleNotSelected,
    EmailAlreadyRegistered { message: String },
    Rejected { message: String },
    InvalidCode { message: String },
    Unauthorized { message: String },
    ResendCooldown { remaining_secs: u64 },
    ProfileRoleMismatch { expected: Role },
    NotVerified,
    Network,
    Service { message: String },
}

impl SignupError {
    /// User-facing text.
    pub fn message(&self) -> String {
        match self {
            SignupError::RoleNotSelected => "Please choose a role to continue".to_string(),
            SignupError::EmailAlreadyRegistered { message }
            | SignupError::Rejected { message }
            | SignupError::InvalidCode { message }
            | SignupError::Unauthorized { message }
            | SignupError::Service { message } => message.clone(),
            SignupError::ResendCooldown { remaining_secs } => {
                format!("Please wait {remaining_secs}s before requesting a new code")
            }
            SignupError::ProfileRoleMismatch { expected } => {
                format!("Profile details must be filled in as {expected}")
            }
            SignupError::NotVerified => "Please verify your email first".to_string(),
            SignupError::Network => {
                "Could not reach the server, please try again".to_string()
            }
        }
    }
}

/// Non-blocking information for the user or for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignupNotice {
    /// The backend reported a different role than the one selected; the
    /// backend's role was applied.
    RoleMismatch { selected: Option<Role>, verified: Role },
    CodeResent,
    AlreadyVerified,
    AlreadyRegistered,
}
