//! Sign-up state machine.
//!
//! Defines a pure state transition function for the registration wizard.
//! Service calls are requested as [`SignupAction`]s; their outcomes come back
//! as result events.

use super::validation::{validate_credentials, validate_profile, validate_verification_code};
use super::{
    FieldError, SignupAction, SignupError, SignupEvent, SignupField, SignupNotice, SignupState,
    SignupStep,
};

/// Pure sign-up state machine: no side effects.
pub struct SignupStateMachine;

impl SignupStateMachine {
    pub fn transition(
        mut state: SignupState,
        event: SignupEvent,
    ) -> (SignupState, Vec<SignupAction>) {
        if state.step.is_terminal() {
            return (state, Vec::new());
        }
        if state.in_flight && !event.is_result() {
            #[cfg(feature = "tracing")]
            tracing::debug!(event = event.name(), step = ?state.step, "ignoring event while in flight");
            return (state, Vec::new());
        }

        match (state.step, event) {
            (SignupStep::Entry, SignupEvent::ChooseSignUp) => {
                (enter(state, SignupStep::RoleSelect), Vec::new())
            }
            (SignupStep::Entry, SignupEvent::ChooseSignIn) => {
                (enter(state, SignupStep::SignInRedirect), Vec::new())
            }

            (SignupStep::RoleSelect, SignupEvent::SelectRole { role }) => {
                state.session.select_role(role);
                state.clear_feedback();
                (state, Vec::new())
            }
            (SignupStep::RoleSelect, SignupEvent::Next) => {
                if state.session.selected_role.is_none() {
                    state.error = Some(SignupError::RoleNotSelected);
                    return (state, Vec::new());
                }
                (enter(state, SignupStep::Credentials), Vec::new())
            }

            (
                SignupStep::Credentials,
                SignupEvent::SubmitCredentials {
                    email,
                    password,
                    confirm_password,
                },
            ) => {
                state.clear_feedback();
                let field_errors = validate_credentials(&email, &password, &confirm_password);
                // the confirmation echo is not needed past this point
                drop(confirm_password);
                if !field_errors.is_empty() {
                    state.field_errors = field_errors;
                    return (state, Vec::new());
                }
                let Some(role) = state.session.selected_role else {
                    state.error = Some(SignupError::RoleNotSelected);
                    return (state, Vec::new());
                };

                let email = email.trim().to_string();
                state.session.email = Some(email.clone());
                if state.session.registered_email.as_deref() == Some(email.as_str()) {
                    let mut next = enter(state, SignupStep::EmailVerify);
                    next.notice = Some(SignupNotice::AlreadyRegistered);
                    return (next, Vec::new());
                }

                state.in_flight = true;
                (
                    state,
                    vec![SignupAction::Register {
                        email,
                        password,
                        role,
                    }],
                )
            }
            (SignupStep::Credentials, SignupEvent::RegisterSucceeded) => {
                state.in_flight = false;
                state.session.registered_email = state.session.email.clone();
                (
                    enter(state, SignupStep::EmailVerify),
                    vec![SignupAction::StartResendCooldown],
                )
            }
            (SignupStep::Credentials, SignupEvent::RegisterFailed { error }) => {
                state.in_flight = false;
                state.error = Some(error);
                (state, Vec::new())
            }

            (SignupStep::EmailVerify, SignupEvent::SubmitVerificationCode { code }) => {
                state.clear_feedback();
                if state.session.is_verified() {
                    let mut next = enter(state, SignupStep::ProfileDetails);
                    next.notice = Some(SignupNotice::AlreadyVerified);
                    return (next, Vec::new());
                }
                if let Some(field_error) = validate_verification_code(&code)
                    .into_field_error(SignupField::VerificationCode)
                {
                    state.field_errors.push(field_error);
                    return (state, Vec::new());
                }
                let Some(email) = state.session.email.clone() else {
                    state.error = Some(SignupError::NotVerified);
                    return (state, Vec::new());
                };
                state.in_flight = true;
                (
                    state,
                    vec![SignupAction::VerifyCode {
                        email,
                        code: code.trim().to_string(),
                    }],
                )
            }
            (SignupStep::EmailVerify, SignupEvent::VerifySucceeded { user_id, role }) => {
                state.in_flight = false;
                let outcome = state.session.record_verification(user_id, role);
                #[cfg(feature = "tracing")]
                if let Some(ignored) = &outcome.ignored_user_id {
                    tracing::warn!(ignored = %ignored, "verification reply carried a different user id; keeping the first");
                }
                let mut next = enter(state, SignupStep::ProfileDetails);
                let mut actions = Vec::new();
                if let Some(selected) = outcome.role_mismatch {
                    next.notice = Some(SignupNotice::RoleMismatch {
                        selected,
                        verified: role,
                    });
                    actions.push(SignupAction::WarnRoleMismatch {
                        selected,
                        verified: role,
                    });
                }
                (next, actions)
            }
            (SignupStep::EmailVerify, SignupEvent::VerifyFailed { error }) => {
                state.in_flight = false;
                state.error = Some(error);
                (state, Vec::new())
            }
            (SignupStep::EmailVerify, SignupEvent::RequestResendCode { now_ms }) => {
                state.clear_feedback();
                let remaining_secs = state.resend_remaining_secs(now_ms);
                if remaining_secs > 0 {
                    state.error = Some(SignupError::ResendCooldown { remaining_secs });
                    return (state, Vec::new());
                }
                let Some(email) = state.session.email.clone() else {
                    state.error = Some(SignupError::NotVerified);
                    return (state, Vec::new());
                };
                state.in_flight = true;
                (state, vec![SignupAction::ResendCode { email }])
            }
            (SignupStep::EmailVerify, SignupEvent::ResendSucceeded) => {
                state.in_flight = false;
                state.notice = Some(SignupNotice::CodeResent);
                (state, vec![SignupAction::StartResendCooldown])
            }
            (SignupStep::EmailVerify, SignupEvent::ResendFailed { error }) => {
                state.in_flight = false;
                state.error = Some(error);
                (state, Vec::new())
            }

            (SignupStep::ProfileDetails, SignupEvent::SubmitProfile { profile }) => {
                state.clear_feedback();
                if state.session.completion.is_some() {
                    return (state, Vec::new());
                }
                let Some(user_id) = state.session.verified_user_id().cloned() else {
                    state.error = Some(SignupError::NotVerified);
                    return (state, Vec::new());
                };
                if let Some(expected) = state.session.selected_role {
                    if profile.role() != expected {
                        state.error = Some(SignupError::ProfileRoleMismatch { expected });
                        return (state, Vec::new());
                    }
                }
                let field_errors: Vec<FieldError> = validate_profile(&profile);
                state.session.profile_draft = Some(profile.clone());
                if !field_errors.is_empty() {
                    state.field_errors = field_errors;
                    return (state, Vec::new());
                }
                state.in_flight = true;
                (
                    state,
                    vec![SignupAction::CompleteProfile { user_id, profile }],
                )
            }
            (SignupStep::ProfileDetails, SignupEvent::ProfileCompleted { completion }) => {
                state.in_flight = false;
                state.session.completion = Some(completion);
                (enter(state, SignupStep::Success), Vec::new())
            }
            (SignupStep::ProfileDetails, SignupEvent::ProfileFailed { error }) => {
                state.in_flight = false;
                state.error = Some(error);
                (state, Vec::new())
            }

            (_, SignupEvent::CooldownStarted { until_ms }) => {
                state.resend_available_at_ms = Some(until_ms);
                (state, Vec::new())
            }

            (_, SignupEvent::Back) => match state.back_target() {
                Some(previous) => (enter(state, previous), Vec::new()),
                None => (state, Vec::new()),
            },

            (_step, _event) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(step = ?_step, event = _event.name(), "event not handled in this step");
                (state, Vec::new())
            }
        }
    }
}

/// Move to `to` and drop feedback that belonged to the previous step.
fn enter(mut state: SignupState, to: SignupStep) -> SignupState {
    debug_assert!(
        state.step.can_transition_to(to),
        "undeclared transition {:?} -> {:?}",
        state.step,
        to
    );
    state.step = to;
    state.in_flight = false;
    state.clear_feedback();
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{
        AdminProfile, ProfileCompletion, ProfileDraft, Role, RoleProfile, StudentProfile,
        TeacherProfile,
    };
    use crate::ids::UserId;
    use crate::security::SecretString;

    fn run(state: SignupState, event: SignupEvent) -> (SignupState, Vec<SignupAction>) {
        SignupStateMachine::transition(state, event)
    }

    fn credentials(email: &str) -> SignupEvent {
        SignupEvent::SubmitCredentials {
            email: email.to_string(),
            password: SecretString::from("Abc12345!"),
            confirm_password: SecretString::from("Abc12345!"),
        }
    }

    fn at_credentials(role: Role) -> SignupState {
        let (state, _) = run(SignupState::new(), SignupEvent::ChooseSignUp);
        let (state, _) = run(state, SignupEvent::SelectRole { role });
        let (state, _) = run(state, SignupEvent::Next);
        assert_eq!(state.step, SignupStep::Credentials);
        state
    }

    fn at_email_verify(role: Role) -> SignupState {
        let (state, _) = run(at_credentials(role), credentials("kid@school.edu"));
        let (state, _) = run(state, SignupEvent::RegisterSucceeded);
        assert_eq!(state.step, SignupStep::EmailVerify);
        state
    }

    fn at_profile_details(role: Role) -> SignupState {
        let (state, _) = run(
            at_email_verify(role),
            SignupEvent::SubmitVerificationCode {
                code: "123456".to_string(),
            },
        );
        let (state, _) = run(
            state,
            SignupEvent::VerifySucceeded {
                user_id: UserId::from("u-1"),
                role,
            },
        );
        assert_eq!(state.step, SignupStep::ProfileDetails);
        state
    }

    fn student_profile() -> ProfileDraft {
        ProfileDraft {
            full_name: "Kid Example".to_string(),
            phone: None,
            details: RoleProfile::Student(StudentProfile {
                school: Some("Hill High".to_string()),
                grade: Some(9),
                ..StudentProfile::default()
            }),
        }
    }

    #[test]
    fn entry_sign_up_lands_on_role_select() {
        let (next, actions) = run(SignupState::new(), SignupEvent::ChooseSignUp);
        assert_eq!(next.step, SignupStep::RoleSelect);
        assert!(actions.is_empty());
    }

    #[test]
    fn entry_sign_in_is_terminal() {
        let (next, actions) = run(SignupState::new(), SignupEvent::ChooseSignIn);
        assert_eq!(next.step, SignupStep::SignInRedirect);
        assert!(actions.is_empty());

        let probes = || {
            vec![
                SignupEvent::Back,
                SignupEvent::Next,
                SignupEvent::ChooseSignUp,
                SignupEvent::SelectRole { role: Role::Admin },
                credentials("a@b.co"),
                SignupEvent::RegisterSucceeded,
            ]
        };
        for event in probes() {
            let (after, actions) = run(next.clone(), event);
            assert_eq!(after, next);
            assert!(actions.is_empty());
        }
    }

    #[test]
    fn next_without_role_holds_with_error() {
        let (state, _) = run(SignupState::new(), SignupEvent::ChooseSignUp);
        let (state, _) = run(state, SignupEvent::Next);
        assert_eq!(state.step, SignupStep::RoleSelect);
        assert_eq!(state.error, Some(SignupError::RoleNotSelected));
    }

    #[test]
    fn invalid_credentials_produce_field_errors_and_no_call() {
        let state = at_credentials(Role::Student);
        let (next, actions) = run(
            state,
            SignupEvent::SubmitCredentials {
                email: "broken".to_string(),
                password: SecretString::from("Abc12345!"),
                confirm_password: SecretString::from("Abc12345?"),
            },
        );
        assert_eq!(next.step, SignupStep::Credentials);
        assert!(actions.is_empty());
        assert!(next.field_error(SignupField::Email).is_some());
        assert!(next.field_error(SignupField::ConfirmPassword).is_some());
        assert!(next.field_error(SignupField::Password).is_none());
        assert!(!next.in_flight);
    }

    #[test]
    fn valid_credentials_request_registration() {
        let (next, actions) = run(at_credentials(Role::Teacher), credentials(" t@school.edu "));
        assert!(next.in_flight);
        assert_eq!(next.step, SignupStep::Credentials);
        assert_eq!(next.session.email.as_deref(), Some("t@school.edu"));
        match actions.as_slice() {
            [SignupAction::Register {
                email,
                password,
                role,
            }] => {
                assert_eq!(email, "t@school.edu");
                assert_eq!(password.expose(), "Abc12345!");
                assert_eq!(*role, Role::Teacher);
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn duplicate_submission_is_ignored_while_in_flight() {
        let (pending, _) = run(at_credentials(Role::Student), credentials("a@b.co"));
        let (again, actions) = run(pending.clone(), credentials("a@b.co"));
        assert!(actions.is_empty());
        assert_eq!(again, pending);

        let (back, actions) = run(pending.clone(), SignupEvent::Back);
        assert!(actions.is_empty());
        assert_eq!(back.step, SignupStep::Credentials);
    }

    #[test]
    fn register_failure_holds_on_credentials() {
        let (pending, _) = run(at_credentials(Role::Student), credentials("a@b.co"));
        let error = SignupError::EmailAlreadyRegistered {
            message: "Email already registered".to_string(),
        };
        let (next, actions) = run(
            pending,
            SignupEvent::RegisterFailed {
                error: error.clone(),
            },
        );
        assert_eq!(next.step, SignupStep::Credentials);
        assert_eq!(next.error, Some(error));
        assert!(!next.in_flight);
        assert!(actions.is_empty());
    }

    #[test]
    fn register_success_moves_to_verify_and_starts_cooldown() {
        let (pending, _) = run(at_credentials(Role::Student), credentials("a@b.co"));
        let (next, actions) = run(pending, SignupEvent::RegisterSucceeded);
        assert_eq!(next.step, SignupStep::EmailVerify);
        assert_eq!(next.session.registered_email.as_deref(), Some("a@b.co"));
        assert!(matches!(
            actions.as_slice(),
            [SignupAction::StartResendCooldown]
        ));
    }

    #[test]
    fn resubmitting_registered_email_skips_second_registration() {
        let state = at_email_verify(Role::Student);
        let (state, _) = run(state, SignupEvent::Back);
        assert_eq!(state.step, SignupStep::Credentials);

        let (next, actions) = run(state, credentials("kid@school.edu"));
        assert!(actions.is_empty());
        assert_eq!(next.step, SignupStep::EmailVerify);
        assert_eq!(next.notice, Some(SignupNotice::AlreadyRegistered));
    }

    #[test]
    fn malformed_code_is_rejected_locally() {
        let (next, actions) = run(
            at_email_verify(Role::Student),
            SignupEvent::SubmitVerificationCode {
                code: "12ab".to_string(),
            },
        );
        assert!(actions.is_empty());
        assert!(next.field_error(SignupField::VerificationCode).is_some());
    }

    #[test]
    fn verification_reply_overrides_mismatched_role() {
        let (pending, actions) = run(
            at_email_verify(Role::Student),
            SignupEvent::SubmitVerificationCode {
                code: "123456".to_string(),
            },
        );
        assert!(matches!(actions.as_slice(), [SignupAction::VerifyCode { .. }]));

        let (next, actions) = run(
            pending,
            SignupEvent::VerifySucceeded {
                user_id: UserId::from("u-7"),
                role: Role::Teacher,
            },
        );
        assert_eq!(next.step, SignupStep::ProfileDetails);
        assert_eq!(next.session.selected_role, Some(Role::Teacher));
        assert_eq!(next.session.verified_user_id(), Some(&UserId::from("u-7")));
        assert_eq!(
            next.notice,
            Some(SignupNotice::RoleMismatch {
                selected: Some(Role::Student),
                verified: Role::Teacher
            })
        );
        assert!(matches!(
            actions.as_slice(),
            [SignupAction::WarnRoleMismatch {
                selected: Some(Role::Student),
                verified: Role::Teacher
            }]
        ));
        assert_eq!(
            next.session.profile_draft.as_ref().map(ProfileDraft::role),
            Some(Role::Teacher)
        );
    }

    #[test]
    fn next_is_ignored_on_verify_and_profile_steps() {
        let verify = at_email_verify(Role::Student);
        let (after, actions) = run(verify.clone(), SignupEvent::Next);
        assert_eq!(after, verify);
        assert!(actions.is_empty());

        let profile = at_profile_details(Role::Student);
        let (after, actions) = run(profile.clone(), SignupEvent::Next);
        assert_eq!(after, profile);
        assert!(actions.is_empty());
    }

    #[test]
    fn resend_is_rejected_during_cooldown_and_allowed_after() {
        let state = at_email_verify(Role::Student);
        let (state, _) = run(state, SignupEvent::CooldownStarted { until_ms: 30_000 });

        let (blocked, actions) = run(state.clone(), SignupEvent::RequestResendCode { now_ms: 10_000 });
        assert!(actions.is_empty());
        assert_eq!(
            blocked.error,
            Some(SignupError::ResendCooldown { remaining_secs: 20 })
        );

        let (allowed, actions) = run(state, SignupEvent::RequestResendCode { now_ms: 30_000 });
        assert!(allowed.in_flight);
        assert!(matches!(
            actions.as_slice(),
            [SignupAction::ResendCode { email }] if email == "kid@school.edu"
        ));

        let (after, actions) = run(allowed, SignupEvent::ResendSucceeded);
        assert_eq!(after.notice, Some(SignupNotice::CodeResent));
        assert!(matches!(
            actions.as_slice(),
            [SignupAction::StartResendCooldown]
        ));
    }

    #[test]
    fn profile_submission_requests_completion() {
        let (next, actions) = run(
            at_profile_details(Role::Student),
            SignupEvent::SubmitProfile {
                profile: student_profile(),
            },
        );
        assert!(next.in_flight);
        match actions.as_slice() {
            [SignupAction::CompleteProfile { user_id, profile }] => {
                assert_eq!(user_id.as_str(), "u-1");
                assert_eq!(profile, &student_profile());
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn profile_for_wrong_role_is_rejected() {
        let profile = ProfileDraft {
            full_name: "T".to_string(),
            phone: None,
            details: RoleProfile::Teacher(TeacherProfile::default()),
        };
        let (next, actions) = run(
            at_profile_details(Role::Student),
            SignupEvent::SubmitProfile { profile },
        );
        assert!(actions.is_empty());
        assert_eq!(
            next.error,
            Some(SignupError::ProfileRoleMismatch {
                expected: Role::Student
            })
        );
    }

    #[test]
    fn profile_failure_holds_on_profile_details() {
        let (pending, _) = run(
            at_profile_details(Role::Student),
            SignupEvent::SubmitProfile {
                profile: student_profile(),
            },
        );
        let (next, actions) = run(
            pending,
            SignupEvent::ProfileFailed {
                error: SignupError::Service {
                    message: "Internal server error".to_string(),
                },
            },
        );
        assert_eq!(next.step, SignupStep::ProfileDetails);
        assert!(!next.in_flight);
        assert!(next.error.is_some());
        assert!(actions.is_empty());
    }

    #[test]
    fn profile_completion_reaches_success() {
        let (pending, _) = run(
            at_profile_details(Role::Student),
            SignupEvent::SubmitProfile {
                profile: student_profile(),
            },
        );
        let completion = ProfileCompletion {
            user_id: UserId::from("u-1"),
            email: "kid@school.edu".to_string(),
            role: Role::Student,
            full_name: "Kid Example".to_string(),
            message: None,
        };
        let (next, _) = run(
            pending,
            SignupEvent::ProfileCompleted {
                completion: completion.clone(),
            },
        );
        assert_eq!(next.step, SignupStep::Success);
        assert_eq!(next.session.completion, Some(completion));
    }

    #[test]
    fn back_from_profile_then_resubmitting_code_does_not_reverify() {
        let state = at_profile_details(Role::Student);
        let (state, _) = run(state, SignupEvent::Back);
        assert_eq!(state.step, SignupStep::EmailVerify);

        let (next, actions) = run(
            state,
            SignupEvent::SubmitVerificationCode {
                code: "654321".to_string(),
            },
        );
        assert!(actions.is_empty());
        assert_eq!(next.step, SignupStep::ProfileDetails);
        assert_eq!(next.session.verified_user_id(), Some(&UserId::from("u-1")));
    }

    #[test]
    fn back_walks_to_immediately_preceding_step() {
        let mut state = at_email_verify(Role::Student);
        let expected = [
            SignupStep::Credentials,
            SignupStep::RoleSelect,
            SignupStep::Entry,
            SignupStep::Entry,
        ];
        for step in expected {
            let (next, actions) = run(state, SignupEvent::Back);
            assert!(actions.is_empty());
            assert_eq!(next.step, step);
            state = next;
        }
    }

    #[test]
    fn back_stops_at_email_verify_once_verified() {
        let state = at_profile_details(Role::Teacher);
        let (state, _) = run(state, SignupEvent::Back);
        assert_eq!(state.step, SignupStep::EmailVerify);
        assert!(!state.can_go_back());

        let (after, actions) = run(state.clone(), SignupEvent::Back);
        assert!(actions.is_empty());
        assert_eq!(after, state);
    }

    #[test]
    fn verified_role_cannot_be_swapped_by_walking_back() {
        let mut state = at_profile_details(Role::Teacher);
        for _ in 0..3 {
            state = run(state, SignupEvent::Back).0;
        }
        assert_eq!(state.step, SignupStep::EmailVerify);

        let (state, _) = run(state, SignupEvent::SelectRole { role: Role::Admin });
        let (state, _) = run(state, SignupEvent::Next);
        assert_eq!(state.session.selected_role, Some(Role::Teacher));

        let (state, _) = run(
            state,
            SignupEvent::SubmitVerificationCode {
                code: "000000".to_string(),
            },
        );
        assert_eq!(state.step, SignupStep::ProfileDetails);
        let admin = ProfileDraft {
            full_name: "Ada Admin".to_string(),
            phone: None,
            details: RoleProfile::Admin(AdminProfile::default()),
        };
        let (next, actions) = run(state, SignupEvent::SubmitProfile { profile: admin });
        assert!(actions.is_empty());
        assert_eq!(
            next.error,
            Some(SignupError::ProfileRoleMismatch {
                expected: Role::Teacher
            })
        );
    }

    #[test]
    fn verified_email_cannot_be_replaced_by_walking_back() {
        let mut state = at_profile_details(Role::Student);
        for _ in 0..2 {
            state = run(state, SignupEvent::Back).0;
        }
        assert_eq!(state.step, SignupStep::EmailVerify);

        let (state, actions) = run(state, credentials("other@school.edu"));
        assert!(actions.is_empty());
        assert_eq!(state.step, SignupStep::EmailVerify);
        assert_eq!(state.session.email.as_deref(), Some("kid@school.edu"));
        assert_eq!(
            state.session.registered_email.as_deref(),
            Some("kid@school.edu")
        );
    }

    #[test]
    fn stray_result_events_are_ignored() {
        let state = at_credentials(Role::Student);
        let (next, actions) = run(
            state.clone(),
            SignupEvent::VerifySucceeded {
                user_id: UserId::from("u-x"),
                role: Role::Admin,
            },
        );
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }
}
