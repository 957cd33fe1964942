use crate::account::{ProfileCompletion, ProfileDraft, Role};
use crate::ids::UserId;
use crate::security::SecretString;
use crate::signup::SignupError;

/// Events that drive the sign-up flow.
///
/// User events come from the front end; result events are fed back by the
/// orchestrator after it executed an action.
#[derive(Debug)]
pub enum SignupEvent {
    // Entry
    ChooseSignUp,
    ChooseSignIn,

    // Role selection
    SelectRole { role: Role },

    // Navigation
    Next,
    Back,

    // Credentials
    SubmitCredentials {
        email: String,
        password: SecretString,
        confirm_password: SecretString,
    },
    RegisterSucceeded,
    RegisterFailed { error: SignupError },

    // Email verification
    SubmitVerificationCode { code: String },
    VerifySucceeded { user_id: UserId, role: Role },
    VerifyFailed { error: SignupError },
    RequestResendCode { now_ms: i64 },
    ResendSucceeded,
    ResendFailed { error: SignupError },
    CooldownStarted { until_ms: i64 },

    // Profile
    SubmitProfile { profile: ProfileDraft },
    ProfileCompleted { completion: ProfileCompletion },
    ProfileFailed { error: SignupError },
}

impl SignupEvent {
    /// Result events report the outcome of an action and are accepted while
    /// a call is in flight.
    pub fn is_result(&self) -> bool {
        matches!(
            self,
            SignupEvent::RegisterSucceeded
                | SignupEvent::RegisterFailed { .. }
                | SignupEvent::VerifySucceeded { .. }
                | SignupEvent::VerifyFailed { .. }
                | SignupEvent::ResendSucceeded
                | SignupEvent::ResendFailed { .. }
                | SignupEvent::CooldownStarted { .. }
                | SignupEvent::ProfileCompleted { .. }
                | SignupEvent::ProfileFailed { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            SignupEvent::ChooseSignUp => "ChooseSignUp",
            SignupEvent::ChooseSignIn => "ChooseSignIn",
            SignupEvent::SelectRole { .. } => "SelectRole",
            SignupEvent::Next => "Next",
            SignupEvent::Back => "Back",
            SignupEvent::SubmitCredentials { .. } => "SubmitCredentials",
            SignupEvent::RegisterSucceeded => "RegisterSucceeded",
            SignupEvent::RegisterFailed { .. } => "RegisterFailed",
            SignupEvent::SubmitVerificationCode { .. } => "SubmitVerificationCode",
            SignupEvent::VerifySucceeded { .. } => "VerifySucceeded",
            SignupEvent::VerifyFailed { .. } => "VerifyFailed",
            SignupEvent::RequestResendCode { .. } => "RequestResendCode",
            SignupEvent::ResendSucceeded => "ResendSucceeded",
            SignupEvent::ResendFailed { .. } => "ResendFailed",
            SignupEvent::CooldownStarted { .. } => "CooldownStarted",
            SignupEvent::SubmitProfile { .. } => "SubmitProfile",
            SignupEvent::ProfileCompleted { .. } => "ProfileCompleted",
            SignupEvent::ProfileFailed { .. } => "ProfileFailed",
        }
    }
}
