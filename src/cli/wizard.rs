//! Interactive sign-up and login prompts.

use std::str::FromStr;

use tokio::io::AsyncBufRead;
use tracing::{info, warn};

use lh_app::{AuthError, LoginUser, SignupOrchestrator, SignupOrchestratorError};
use lh_core::account::{
    AdminProfile, ProfileDraft, Role, RoleProfile, StudentProfile, TeacherProfile,
};
use lh_core::security::SecretString;
use lh_core::signup::validation::password_strength;
use lh_core::signup::{SignupState, SignupStep};

use super::input::{is_back, list, optional_number, optional_text};
use super::terminal::Console;

const MAX_LOGIN_ATTEMPTS: usize = 3;

/// How a sign-up session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// Profile completed for this email.
    Completed { email: String },
    /// The user chose to sign in instead.
    SignIn,
    /// Input ended before a terminal step.
    Abandoned,
}

pub async fn run_signup<R>(
    flow: &SignupOrchestrator,
    console: &mut Console<R>,
) -> anyhow::Result<WizardOutcome>
where
    R: AsyncBufRead + Unpin,
{
    let outcome = loop {
        let state = flow.get_state().await;
        let step_result = match state.step {
            SignupStep::Entry => entry_step(flow, console).await?,
            SignupStep::RoleSelect => role_step(flow, console).await?,
            SignupStep::Credentials => credentials_step(flow, console).await?,
            SignupStep::EmailVerify => verify_step(flow, console, &state).await?,
            SignupStep::ProfileDetails => profile_step(flow, console, &state).await?,
            SignupStep::Success => {
                let email = state
                    .session
                    .completion
                    .as_ref()
                    .map(|c| c.email.clone())
                    .or(state.session.email.clone())
                    .unwrap_or_default();
                if let Some(completion) = &state.session.completion {
                    println!(
                        "Welcome, {}! Your {} account is ready.",
                        completion.full_name, completion.role
                    );
                }
                break WizardOutcome::Completed { email };
            }
            SignupStep::SignInRedirect => break WizardOutcome::SignIn,
        };

        match step_result {
            StepInput::Dispatched(Ok(_)) | StepInput::Retry => {}
            StepInput::Dispatched(Err(SignupOrchestratorError::Busy)) => {
                println!("Still working on the previous request...");
            }
            StepInput::Dispatched(Err(SignupOrchestratorError::Unmounted)) => {
                break WizardOutcome::Abandoned;
            }
            StepInput::EndOfInput => break WizardOutcome::Abandoned,
        }
    };

    flow.unmount().await;
    info!(?outcome, "signup wizard finished");
    Ok(outcome)
}

enum StepInput {
    Dispatched(Result<SignupState, SignupOrchestratorError>),
    /// Nothing dispatched; ask again.
    Retry,
    EndOfInput,
}

macro_rules! answer_or_eof {
    ($console:expr, $label:expr) => {
        match $console.prompt($label).await? {
            Some(answer) => answer,
            None => return Ok(StepInput::EndOfInput),
        }
    };
    ($console:expr, $label:expr, secret) => {
        match $console.prompt_secret($label).await? {
            Some(answer) => answer,
            None => return Ok(StepInput::EndOfInput),
        }
    };
}

async fn entry_step<R: AsyncBufRead + Unpin>(
    flow: &SignupOrchestrator,
    console: &mut Console<R>,
) -> anyhow::Result<StepInput> {
    let answer = answer_or_eof!(console, "New to LearnHub? Type 'signup' to create an account or 'signin': ");
    let result = match answer.trim().to_ascii_lowercase().as_str() {
        "" | "signup" | "sign up" | "up" => flow.choose_sign_up().await,
        "signin" | "sign in" | "in" | "login" => flow.choose_sign_in().await,
        _ => {
            println!("Please type 'signup' or 'signin'.");
            return Ok(StepInput::Retry);
        }
    };
    Ok(StepInput::Dispatched(result))
}

async fn role_step<R: AsyncBufRead + Unpin>(
    flow: &SignupOrchestrator,
    console: &mut Console<R>,
) -> anyhow::Result<StepInput> {
    let answer = answer_or_eof!(console, "I am a [student/teacher/admin] (or 'back'): ");
    if is_back(&answer) {
        return Ok(StepInput::Dispatched(flow.back().await));
    }
    if answer.trim().is_empty() {
        // Next without a role surfaces the flow's own error.
        return Ok(StepInput::Dispatched(flow.next().await));
    }
    let role = match Role::from_str(&answer) {
        Ok(role) => role,
        Err(err) => {
            println!("{err}");
            return Ok(StepInput::Retry);
        }
    };
    if let Err(err) = flow.select_role(role).await {
        return Ok(StepInput::Dispatched(Err(err)));
    }
    Ok(StepInput::Dispatched(flow.next().await))
}

async fn credentials_step<R: AsyncBufRead + Unpin>(
    flow: &SignupOrchestrator,
    console: &mut Console<R>,
) -> anyhow::Result<StepInput> {
    let email = answer_or_eof!(console, "Email (or 'back'): ");
    if is_back(&email) {
        return Ok(StepInput::Dispatched(flow.back().await));
    }
    let password = answer_or_eof!(console, "Password: ", secret);
    println!("Password strength: {:?}", password_strength(&password));
    let confirm_password = answer_or_eof!(console, "Confirm password: ", secret);

    Ok(StepInput::Dispatched(
        flow.submit_credentials(email, password, confirm_password)
            .await,
    ))
}

async fn verify_step<R: AsyncBufRead + Unpin>(
    flow: &SignupOrchestrator,
    console: &mut Console<R>,
    state: &SignupState,
) -> anyhow::Result<StepInput> {
    let email = state.session.email.as_deref().unwrap_or("your inbox");
    let back_hint = if state.can_go_back() { ", 'back'" } else { "" };
    let label = match flow.resend_remaining_secs().await {
        0 => format!("Code sent to {email} ('resend' for a new one{back_hint}): "),
        secs => format!("Code sent to {email} (resend in {secs}s{back_hint}): "),
    };
    let answer = answer_or_eof!(console, &label);
    let result = if is_back(&answer) {
        flow.back().await
    } else if answer.trim().eq_ignore_ascii_case("resend") {
        flow.resend_code().await
    } else {
        flow.submit_verification_code(answer).await
    };
    Ok(StepInput::Dispatched(result))
}

async fn profile_step<R: AsyncBufRead + Unpin>(
    flow: &SignupOrchestrator,
    console: &mut Console<R>,
    state: &SignupState,
) -> anyhow::Result<StepInput> {
    let Some(role) = state.session.selected_role else {
        warn!("profile step reached without a role");
        return Ok(StepInput::Dispatched(flow.back().await));
    };

    let full_name = answer_or_eof!(console, "Full name (or 'back'): ");
    if is_back(&full_name) {
        return Ok(StepInput::Dispatched(flow.back().await));
    }
    let phone = optional_text(&answer_or_eof!(console, "Phone (optional): "));

    let details = match role {
        Role::Student => {
            let school = optional_text(&answer_or_eof!(console, "School (optional): "));
            let grade = loop {
                match optional_number::<u8>(&answer_or_eof!(console, "Grade 1-12 (optional): ")) {
                    Ok(grade) => break grade,
                    Err(err) => println!("{err}"),
                }
            };
            let guardian_name = optional_text(&answer_or_eof!(console, "Guardian name (optional): "));
            let guardian_phone =
                optional_text(&answer_or_eof!(console, "Guardian phone (optional): "));
            let guardian_email =
                optional_text(&answer_or_eof!(console, "Guardian email (optional): "));
            RoleProfile::Student(StudentProfile {
                school,
                grade,
                guardian_name,
                guardian_phone,
                guardian_email,
            })
        }
        Role::Teacher => {
            let experience_years = loop {
                match optional_number::<u8>(&answer_or_eof!(
                    console,
                    "Years of experience (optional): "
                )) {
                    Ok(years) => break years,
                    Err(err) => println!("{err}"),
                }
            };
            let qualifications = list(&answer_or_eof!(
                console,
                "Qualifications, comma separated (optional): "
            ));
            let subjects = list(&answer_or_eof!(
                console,
                "Subjects, comma separated (optional): "
            ));
            let bio = optional_text(&answer_or_eof!(console, "Short bio (optional): "));
            RoleProfile::Teacher(TeacherProfile {
                experience_years,
                qualifications,
                subjects,
                bio,
            })
        }
        Role::Admin => {
            let department = optional_text(&answer_or_eof!(console, "Department (optional): "));
            let position = optional_text(&answer_or_eof!(console, "Position (optional): "));
            RoleProfile::Admin(AdminProfile {
                department,
                position,
            })
        }
    };

    let profile = ProfileDraft {
        full_name: full_name.trim().to_string(),
        phone,
        details,
    };
    Ok(StepInput::Dispatched(flow.submit_profile(profile).await))
}

/// Prompt for credentials and sign in. Returns `true` once signed in.
pub async fn run_login<R>(
    login: &LoginUser,
    console: &mut Console<R>,
    email_hint: Option<&str>,
) -> anyhow::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    for _ in 0..MAX_LOGIN_ATTEMPTS {
        let label = match email_hint {
            Some(hint) => format!("Email [{hint}]: "),
            None => "Email: ".to_string(),
        };
        let Some(answer) = console.prompt(&label).await? else {
            return Ok(false);
        };
        let email = optional_text(&answer)
            .or_else(|| email_hint.map(str::to_string))
            .unwrap_or_default();
        let Some(password) = console.prompt_secret("Password: ").await? else {
            return Ok(false);
        };

        match login.execute(&email, SecretString::new(password)).await {
            Ok(user) => {
                let name = user.full_name.as_deref().unwrap_or(user.email.as_str());
                println!("Signed in as {name} ({}).", user.role);
                return Ok(true);
            }
            Err(err @ (AuthError::InvalidEmail(_) | AuthError::InvalidCredentials { .. })) => {
                println!("! {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }
    println!("Too many failed attempts.");
    Ok(false)
}
