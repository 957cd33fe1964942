use crate::signup::SignupState;

/// Outbound notifications of the sign-up flow, consumed by the front end.
#[async_trait::async_trait]
pub trait SignupEventPort: Send + Sync {
    async fn emit_signup_state_changed(&self, state: SignupState);

    /// One tick of the resend countdown; `0` means a new code may be requested.
    async fn emit_resend_countdown(&self, remaining_secs: u64);
}
