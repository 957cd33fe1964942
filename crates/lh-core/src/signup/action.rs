use crate::account::{ProfileDraft, Role};
use crate::ids::UserId;
use crate::security::SecretString;

/// Side-effects produced by state transitions.
#[derive(Debug)]
pub enum SignupAction {
    /// Register the account.
    Register {
        email: String,
        password: SecretString,
        role: Role,
    },
    /// Check the emailed code with the backend.
    VerifyCode { email: String, code: String },
    /// Ask the backend to send a new code.
    ResendCode { email: String },
    /// Start the client-side resend countdown.
    StartResendCooldown,
    /// Submit the profile draft for the verified user.
    CompleteProfile {
        user_id: UserId,
        profile: ProfileDraft,
    },
    /// Diagnostics only: the backend corrected the selected role.
    WarnRoleMismatch {
        selected: Option<Role>,
        verified: Role,
    },
}
