//! Text shown for sign-up state changes.

use lh_core::signup::{SignupField, SignupNotice, SignupState, SignupStep};

pub fn step_banner(step: SignupStep) -> String {
    match step {
        SignupStep::Success | SignupStep::SignInRedirect => format!("== {} ==", step.title()),
        _ => format!("== Step {}/4: {} ==", step.index(), step.title()),
    }
}

pub fn field_label(field: SignupField) -> &'static str {
    match field {
        SignupField::Role => "Role",
        SignupField::Email => "Email",
        SignupField::Password => "Password",
        SignupField::ConfirmPassword => "Confirm password",
        SignupField::VerificationCode => "Verification code",
        SignupField::FullName => "Full name",
        SignupField::Grade => "Grade",
        SignupField::ExperienceYears => "Experience",
        SignupField::Bio => "Bio",
    }
}

pub fn notice_text(notice: &SignupNotice) -> String {
    match notice {
        SignupNotice::RoleMismatch {
            selected: Some(selected),
            verified,
        } => format!(
            "Your account is registered as {verified}, not {selected}. Continuing as {verified}."
        ),
        SignupNotice::RoleMismatch {
            selected: None,
            verified,
        } => format!("Your account is registered as {verified}."),
        SignupNotice::CodeResent => "A new verification code is on its way.".to_string(),
        SignupNotice::AlreadyVerified => "Your email is already verified.".to_string(),
        SignupNotice::AlreadyRegistered => {
            "This email is already registered in this session; enter the code we sent.".to_string()
        }
    }
}

/// Text for the final countdown tick; earlier ticks stay silent.
pub fn countdown_text(remaining_secs: u64) -> Option<String> {
    (remaining_secs == 0).then(|| "You can request a new code now.".to_string())
}

/// Lines describing what changed between two observed states.
pub fn render_changes(prev: Option<&SignupState>, next: &SignupState) -> Vec<String> {
    let mut lines = Vec::new();

    if prev.map(|p| p.step) != Some(next.step) {
        lines.push(String::new());
        lines.push(step_banner(next.step));
    }
    if next.in_flight && !prev.is_some_and(|p| p.in_flight) {
        lines.push("... contacting LearnHub".to_string());
    }
    if next.error.is_some() && prev.map(|p| &p.error) != Some(&next.error) {
        if let Some(error) = &next.error {
            lines.push(format!("! {}", error.message()));
        }
    }
    if !next.field_errors.is_empty() && prev.map(|p| &p.field_errors) != Some(&next.field_errors) {
        for field_error in &next.field_errors {
            lines.push(format!(
                "! {}: {}",
                field_label(field_error.field),
                field_error.message
            ));
        }
    }
    if next.notice.is_some() && prev.map(|p| &p.notice) != Some(&next.notice) {
        if let Some(notice) = &next.notice {
            lines.push(format!("* {}", notice_text(notice)));
        }
    }

    lines
}
