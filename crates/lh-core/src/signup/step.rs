//! Step registry.
//!
//! Declares the wizard steps, their stable indexes and the transition graph
//! the state machine is allowed to follow.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignupStep {
    /// Landing choice between signing up and signing in.
    Entry,
    RoleSelect,
    Credentials,
    EmailVerify,
    ProfileDetails,
    Success,
    /// Terminal hand-off to the login flow.
    SignInRedirect,
}

impl SignupStep {
    pub const ALL: [SignupStep; 7] = [
        SignupStep::Entry,
        SignupStep::RoleSelect,
        SignupStep::Credentials,
        SignupStep::EmailVerify,
        SignupStep::ProfileDetails,
        SignupStep::Success,
        SignupStep::SignInRedirect,
    ];

    /// Stable numeric identifier of the step.
    pub fn index(self) -> u8 {
        match self {
            SignupStep::Entry => 0,
            SignupStep::RoleSelect => 1,
            SignupStep::Credentials => 2,
            SignupStep::EmailVerify => 3,
            SignupStep::ProfileDetails => 4,
            SignupStep::Success => 5,
            SignupStep::SignInRedirect => 10,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.index() == index)
    }

    pub fn title(self) -> &'static str {
        match self {
            SignupStep::Entry => "Welcome",
            SignupStep::RoleSelect => "Choose your role",
            SignupStep::Credentials => "Create your account",
            SignupStep::EmailVerify => "Verify your email",
            SignupStep::ProfileDetails => "Complete your profile",
            SignupStep::Success => "All set",
            SignupStep::SignInRedirect => "Sign in",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SignupStep::Success | SignupStep::SignInRedirect)
    }

    /// Forward targets declared for this step.
    pub fn successors(self) -> &'static [SignupStep] {
        match self {
            SignupStep::Entry => &[SignupStep::RoleSelect, SignupStep::SignInRedirect],
            SignupStep::RoleSelect => &[SignupStep::Credentials],
            SignupStep::Credentials => &[SignupStep::EmailVerify],
            SignupStep::EmailVerify => &[SignupStep::ProfileDetails],
            SignupStep::ProfileDetails => &[SignupStep::Success],
            SignupStep::Success | SignupStep::SignInRedirect => &[],
        }
    }

    /// Target of the back control, if the step has one.
    ///
    /// The initial step and the terminal steps have none.
    pub fn previous(self) -> Option<SignupStep> {
        match self {
            SignupStep::RoleSelect => Some(SignupStep::Entry),
            SignupStep::Credentials => Some(SignupStep::RoleSelect),
            SignupStep::EmailVerify => Some(SignupStep::Credentials),
            SignupStep::ProfileDetails => Some(SignupStep::EmailVerify),
            SignupStep::Entry | SignupStep::Success | SignupStep::SignInRedirect => None,
        }
    }

    /// Whether the generic "Next" control drives this step.
    ///
    /// EmailVerify and ProfileDetails advance on their own service success.
    pub fn forward_control_enabled(self) -> bool {
        matches!(self, SignupStep::RoleSelect | SignupStep::Credentials)
    }

    pub fn can_transition_to(self, to: SignupStep) -> bool {
        to == self || self.successors().contains(&to) || self.previous() == Some(to)
    }
}
