//! Sign-up orchestrator.
//!
//! This module is the step controller: it feeds events through the pure
//! sign-up state machine and executes the side effects it asks for.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, info_span, warn, Instrument};

use lh_core::{
    account::{ProfileDraft, Role},
    ports::{AccountServicePort, ClockPort, CooldownTimerPort, SignupEventPort},
    security::SecretString,
    signup::{SignupAction, SignupEvent, SignupState, SignupStateMachine},
};

use super::context::SignupContext;
use super::errors::{to_signup_error, ServiceCall};

/// Errors produced by the sign-up orchestrator itself.
///
/// Service failures are not errors at this level: they end up in
/// [`SignupState::error`] and the flow holds its step.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignupOrchestratorError {
    #[error("a sign-up request is still in flight")]
    Busy,
    #[error("sign-up flow has been unmounted")]
    Unmounted,
}

/// Orchestrator that drives sign-up state and side effects.
pub struct SignupOrchestrator {
    context: Arc<SignupContext>,
    unmounted: AtomicBool,
    resend_cooldown_secs: u64,

    account_service: Arc<dyn AccountServicePort>,
    signup_event_port: Arc<dyn SignupEventPort>,
    clock: Arc<dyn ClockPort>,
    cooldown_timer: Arc<dyn CooldownTimerPort>,
}

impl SignupOrchestrator {
    pub fn new(
        account_service: Arc<dyn AccountServicePort>,
        signup_event_port: Arc<dyn SignupEventPort>,
        clock: Arc<dyn ClockPort>,
        cooldown_timer: Arc<dyn CooldownTimerPort>,
        resend_cooldown_secs: u64,
    ) -> Self {
        Self {
            context: SignupContext::default().arc(),
            unmounted: AtomicBool::new(false),
            resend_cooldown_secs,
            account_service,
            signup_event_port,
            clock,
            cooldown_timer,
        }
    }

    pub async fn choose_sign_up(&self) -> Result<SignupState, SignupOrchestratorError> {
        self.dispatch(SignupEvent::ChooseSignUp).await
    }

    pub async fn choose_sign_in(&self) -> Result<SignupState, SignupOrchestratorError> {
        self.dispatch(SignupEvent::ChooseSignIn).await
    }

    pub async fn select_role(&self, role: Role) -> Result<SignupState, SignupOrchestratorError> {
        self.dispatch(SignupEvent::SelectRole { role }).await
    }

    pub async fn next(&self) -> Result<SignupState, SignupOrchestratorError> {
        self.dispatch(SignupEvent::Next).await
    }

    pub async fn back(&self) -> Result<SignupState, SignupOrchestratorError> {
        self.dispatch(SignupEvent::Back).await
    }

    pub async fn submit_credentials(
        &self,
        email: String,
        password: String,
        confirm_password: String,
    ) -> Result<SignupState, SignupOrchestratorError> {
        let event = SignupEvent::SubmitCredentials {
            email,
            password: SecretString::new(password),
            confirm_password: SecretString::new(confirm_password),
        };
        self.dispatch(event).await
    }

    pub async fn submit_verification_code(
        &self,
        code: String,
    ) -> Result<SignupState, SignupOrchestratorError> {
        self.dispatch(SignupEvent::SubmitVerificationCode { code })
            .await
    }

    pub async fn resend_code(&self) -> Result<SignupState, SignupOrchestratorError> {
        let now_ms = self.clock.now_ms();
        self.dispatch(SignupEvent::RequestResendCode { now_ms })
            .await
    }

    pub async fn submit_profile(
        &self,
        profile: ProfileDraft,
    ) -> Result<SignupState, SignupOrchestratorError> {
        self.dispatch(SignupEvent::SubmitProfile { profile }).await
    }

    pub async fn get_state(&self) -> SignupState {
        self.context.get_state().await
    }

    /// Whole seconds left before a new code may be requested.
    pub async fn resend_remaining_secs(&self) -> u64 {
        let now_ms = self.clock.now_ms();
        self.context.get_state().await.resend_remaining_secs(now_ms)
    }

    /// Tear the flow down.
    ///
    /// Stops the resend countdown. Calls still in flight are not aborted, but
    /// their results are discarded and every later dispatch is refused.
    pub async fn unmount(&self) {
        if self.unmounted.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(err) = self.cooldown_timer.stop().await {
            warn!(error = %err, "failed to stop resend countdown on unmount");
        }
        info!("signup flow unmounted");
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted.load(Ordering::SeqCst)
    }

    pub async fn dispatch(&self, event: SignupEvent) -> Result<SignupState, SignupOrchestratorError> {
        if self.is_unmounted() {
            return Err(SignupOrchestratorError::Unmounted);
        }
        // A second submission while a call is pending is refused outright
        // instead of queueing behind it.
        let Some(_dispatch_guard) = self.context.try_acquire_dispatch_lock() else {
            debug!(event = event.name(), "signup dispatch refused: busy");
            return Err(SignupOrchestratorError::Busy);
        };

        let span = info_span!("usecase.signup_orchestrator.dispatch", event = event.name());
        async {
            let mut current = self.context.get_state().await;
            let mut pending_events = VecDeque::from([event]);

            while let Some(event) = pending_events.pop_front() {
                let from = current.step;
                let event_name = event.name();
                let (next, actions) = SignupStateMachine::transition(current, event);
                info!(
                    from = ?from,
                    to = ?next.step,
                    event = event_name,
                    in_flight = next.in_flight,
                    "signup state transition"
                );
                // Published before the actions run so observers see `in_flight`.
                self.set_state_and_emit(next.clone()).await;
                if next.is_terminal() && !from.is_terminal() {
                    self.stop_cooldown().await;
                }
                current = next;

                if actions.is_empty() {
                    continue;
                }
                let follow_up_events = self.execute_actions(actions).await;
                if self.is_unmounted() {
                    warn!(
                        discarded = follow_up_events.len(),
                        "signup results arrived after unmount; not applied"
                    );
                    return Err(SignupOrchestratorError::Unmounted);
                }
                pending_events.extend(follow_up_events);
            }

            Ok(current)
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&self, actions: Vec<SignupAction>) -> Vec<SignupEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "signup executing action");
            let event = match action {
                SignupAction::Register {
                    email,
                    password,
                    role,
                } => match self.account_service.register(&email, &password, role).await {
                    Ok(reply) => {
                        info!(email = %email, role = %reply.role, "registration accepted");
                        SignupEvent::RegisterSucceeded
                    }
                    Err(err) => {
                        error!(error = %err, email = %email, "registration failed");
                        SignupEvent::RegisterFailed {
                            error: to_signup_error(&err, ServiceCall::Register),
                        }
                    }
                },
                SignupAction::VerifyCode { email, code } => {
                    match self.account_service.verify_email(&email, &code).await {
                        Ok(reply) => {
                            info!(user_id = %reply.user_id, role = %reply.role, "email verified");
                            SignupEvent::VerifySucceeded {
                                user_id: reply.user_id,
                                role: reply.role,
                            }
                        }
                        Err(err) => {
                            error!(error = %err, email = %email, "email verification failed");
                            SignupEvent::VerifyFailed {
                                error: to_signup_error(&err, ServiceCall::VerifyCode),
                            }
                        }
                    }
                }
                SignupAction::ResendCode { email } => {
                    match self.account_service.resend_code(&email).await {
                        Ok(reply) => {
                            debug!(message = ?reply.message, "verification code resent");
                            SignupEvent::ResendSucceeded
                        }
                        Err(err) => {
                            error!(error = %err, email = %email, "resending verification code failed");
                            SignupEvent::ResendFailed {
                                error: to_signup_error(&err, ServiceCall::ResendCode),
                            }
                        }
                    }
                }
                SignupAction::StartResendCooldown => {
                    let cooldown_ms = i64::try_from(self.resend_cooldown_secs)
                        .unwrap_or(i64::MAX)
                        .saturating_mul(1000);
                    let until_ms = self.clock.now_ms().saturating_add(cooldown_ms);
                    if let Err(err) = self.cooldown_timer.start(self.resend_cooldown_secs).await {
                        warn!(error = %err, "failed to start resend countdown");
                    }
                    SignupEvent::CooldownStarted { until_ms }
                }
                SignupAction::CompleteProfile { user_id, profile } => {
                    match self
                        .account_service
                        .complete_profile(&user_id, &profile)
                        .await
                    {
                        Ok(completion) => {
                            info!(user_id = %completion.user_id, "profile completed");
                            SignupEvent::ProfileCompleted { completion }
                        }
                        Err(err) => {
                            error!(error = %err, user_id = %user_id, "profile completion failed");
                            SignupEvent::ProfileFailed {
                                error: to_signup_error(&err, ServiceCall::CompleteProfile),
                            }
                        }
                    }
                }
                SignupAction::WarnRoleMismatch { selected, verified } => {
                    warn!(
                        selected = ?selected,
                        verified = %verified,
                        "server-verified role differs from selected role; using server role"
                    );
                    continue;
                }
            };
            follow_up_events.push(event);
        }
        follow_up_events
    }

    async fn stop_cooldown(&self) {
        if let Err(err) = self.cooldown_timer.stop().await {
            warn!(error = %err, "failed to stop resend countdown");
        }
    }

    async fn set_state_and_emit(&self, state: SignupState) {
        self.context.set_state(state.clone()).await;
        self.signup_event_port.emit_signup_state_changed(state).await;
    }
}
