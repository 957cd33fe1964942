//! In-memory registration session.

use serde::{Deserialize, Serialize};

use crate::account::{ProfileCompletion, ProfileDraft, Role};
use crate::ids::UserId;

/// Progress of one sign-up attempt.
///
/// Never persisted. The password is deliberately absent: it only exists
/// inside the register action for the duration of the call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSession {
    pub selected_role: Option<Role>,
    pub email: Option<String>,
    /// Email the backend accepted a registration for.
    pub registered_email: Option<String>,
    verified_user_id: Option<UserId>,
    pub profile_draft: Option<ProfileDraft>,
    pub completion: Option<ProfileCompletion>,
}

/// What applying a verification reply changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// Set when the client-held role differed from the verified one.
    pub role_mismatch: Option<Option<Role>>,
    /// Set when a second reply tried to change the stored id.
    pub ignored_user_id: Option<UserId>,
}

impl RegistrationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verified_user_id(&self) -> Option<&UserId> {
        self.verified_user_id.as_ref()
    }

    pub fn is_verified(&self) -> bool {
        self.verified_user_id.is_some()
    }

    /// Record the user's role choice and keep the profile draft in its shape.
    pub fn select_role(&mut self, role: Role) {
        self.selected_role = Some(role);
        self.profile_draft = self.profile_draft.take().map(|draft| draft.reshape_for(role));
    }

    /// Apply a successful verification reply.
    ///
    /// The server role always wins. The user id is written once and kept
    /// afterwards.
    pub fn record_verification(&mut self, user_id: UserId, role: Role) -> VerificationOutcome {
        let ignored_user_id = match &self.verified_user_id {
            None => {
                self.verified_user_id = Some(user_id);
                None
            }
            Some(existing) if *existing == user_id => None,
            Some(_) => Some(user_id),
        };

        let role_mismatch = if self.selected_role != Some(role) {
            Some(self.selected_role)
        } else {
            None
        };
        self.selected_role = Some(role);
        self.profile_draft = Some(match self.profile_draft.take() {
            Some(draft) => draft.reshape_for(role),
            None => ProfileDraft::empty(role),
        });

        VerificationOutcome {
            role_mismatch,
            ignored_user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verified_user_id_is_written_once() {
        let mut session = RegistrationSession::new();
        session.select_role(Role::Student);
        assert!(!session.is_verified());

        let first = session.record_verification(UserId::from("u-1"), Role::Student);
        assert_eq!(first.ignored_user_id, None);
        assert_eq!(session.verified_user_id(), Some(&UserId::from("u-1")));

        let second = session.record_verification(UserId::from("u-2"), Role::Student);
        assert_eq!(second.ignored_user_id, Some(UserId::from("u-2")));
        assert_eq!(session.verified_user_id(), Some(&UserId::from("u-1")));
    }

    #[test]
    fn server_role_overrides_selection() {
        let mut session = RegistrationSession::new();
        session.select_role(Role::Student);

        let outcome = session.record_verification(UserId::from("u-1"), Role::Teacher);
        assert_eq!(outcome.role_mismatch, Some(Some(Role::Student)));
        assert_eq!(session.selected_role, Some(Role::Teacher));
        assert_eq!(
            session.profile_draft.as_ref().map(ProfileDraft::role),
            Some(Role::Teacher)
        );
    }

    #[test]
    fn matching_role_reports_no_mismatch() {
        let mut session = RegistrationSession::new();
        session.select_role(Role::Admin);
        let outcome = session.record_verification(UserId::from("u-9"), Role::Admin);
        assert_eq!(outcome.role_mismatch, None);
    }
}
