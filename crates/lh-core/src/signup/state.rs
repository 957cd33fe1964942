use serde::{Deserialize, Serialize};

use super::{FieldError, RegistrationSession, SignupError, SignupField, SignupNotice, SignupStep};

/// Sign-up flow state as observed by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupState {
    pub step: SignupStep,
    pub session: RegistrationSession,
    /// A service call for this step is pending; submissions are disabled.
    pub in_flight: bool,
    pub error: Option<SignupError>,
    pub field_errors: Vec<FieldError>,
    pub notice: Option<SignupNotice>,
    /// Earliest time (unix ms) a new verification code may be requested.
    pub resend_available_at_ms: Option<i64>,
}

impl Default for SignupState {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupState {
    pub fn new() -> Self {
        Self {
            step: SignupStep::Entry,
            session: RegistrationSession::new(),
            in_flight: false,
            error: None,
            field_errors: Vec::new(),
            notice: None,
            resend_available_at_ms: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.step.is_terminal()
    }

    pub fn can_go_back(&self) -> bool {
        !self.in_flight && self.back_target().is_some()
    }

    /// Where the back control leads from here.
    ///
    /// Once the email is verified the account identity is fixed, so back
    /// stops at EmailVerify and role and credentials can no longer change.
    pub fn back_target(&self) -> Option<SignupStep> {
        if self.session.is_verified() && self.step == SignupStep::EmailVerify {
            return None;
        }
        self.step.previous()
    }

    pub fn forward_enabled(&self) -> bool {
        !self.in_flight && self.step.forward_control_enabled()
    }

    pub fn field_error(&self, field: SignupField) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Whole seconds left before a resend is allowed at `now_ms`.
    pub fn resend_remaining_secs(&self, now_ms: i64) -> u64 {
        match self.resend_available_at_ms {
            Some(at) if at > now_ms => ((at - now_ms) as u64).div_ceil(1000),
            _ => 0,
        }
    }

    pub(crate) fn clear_feedback(&mut self) {
        self.error = None;
        self.field_errors.clear();
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_at_entry() {
        let state = SignupState::new();
        assert_eq!(state.step, SignupStep::Entry);
        assert!(!state.can_go_back());
        assert!(!state.forward_enabled());
        assert_eq!(state.session, RegistrationSession::new());
    }

    #[test]
    fn resend_remaining_rounds_up() {
        let mut state = SignupState::new();
        assert_eq!(state.resend_remaining_secs(0), 0);

        state.resend_available_at_ms = Some(30_000);
        assert_eq!(state.resend_remaining_secs(0), 30);
        assert_eq!(state.resend_remaining_secs(29_001), 1);
        assert_eq!(state.resend_remaining_secs(30_000), 0);
        assert_eq!(state.resend_remaining_secs(45_000), 0);
    }
}
