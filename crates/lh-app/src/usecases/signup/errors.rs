use lh_core::ports::AccountServiceError;
use lh_core::signup::SignupError;

/// Which facade call produced an error; decides how it reads to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ServiceCall {
    Register,
    VerifyCode,
    ResendCode,
    CompleteProfile,
}

impl ServiceCall {
    fn fallback_message(self) -> &'static str {
        match self {
            ServiceCall::Register => "Registration failed",
            ServiceCall::VerifyCode => "Invalid or expired verification code",
            ServiceCall::ResendCode => "Could not resend the verification code",
            ServiceCall::CompleteProfile => "Could not save your profile",
        }
    }
}

pub(crate) fn to_signup_error(err: &AccountServiceError, call: ServiceCall) -> SignupError {
    let message = err
        .server_message()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(call.fallback_message())
        .to_string();

    match (err, call) {
        (AccountServiceError::Timeout | AccountServiceError::Network(_), _) => SignupError::Network,
        (AccountServiceError::Conflict { .. }, ServiceCall::Register) => {
            SignupError::EmailAlreadyRegistered { message }
        }
        (
            AccountServiceError::Rejected { .. } | AccountServiceError::Conflict { .. },
            ServiceCall::VerifyCode,
        ) => SignupError::InvalidCode { message },
        (AccountServiceError::Rejected { .. } | AccountServiceError::Conflict { .. }, _) => {
            SignupError::Rejected { message }
        }
        (AccountServiceError::Unauthorized { .. }, _) => SignupError::Unauthorized { message },
        (AccountServiceError::Decode(_), _) => SignupError::Service { message },
    }
}
