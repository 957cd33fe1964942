use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, info_span, warn, Instrument};

use lh_core::account::AuthenticatedUser;
use lh_core::ports::{AccountServiceError, AccountServicePort, ClockPort, StoredToken};
use lh_core::security::SecretString;
use lh_core::signup::validation::validate_email;

use super::{AuthContext, AuthError};

/// Sign in with email and password and persist the resulting access token.
pub struct LoginUser {
    account_service: Arc<dyn AccountServicePort>,
    auth_context: Arc<AuthContext>,
    clock: Arc<dyn ClockPort>,
}

impl LoginUser {
    pub fn new(
        account_service: Arc<dyn AccountServicePort>,
        auth_context: Arc<AuthContext>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            account_service,
            auth_context,
            clock,
        }
    }

    pub async fn execute(
        &self,
        email: &str,
        password: SecretString,
    ) -> Result<AuthenticatedUser, AuthError> {
        let span = info_span!("usecase.login_user.execute");

        async {
            let email = email.trim();
            let checked = validate_email(email);
            if !checked.valid {
                return Err(AuthError::InvalidEmail(
                    checked.message.unwrap_or_else(|| "Invalid email".to_string()),
                ));
            }
            if password.is_empty() {
                return Err(AuthError::InvalidCredentials { message: None });
            }

            let reply = match self.account_service.login(email, &password).await {
                Ok(reply) => reply,
                Err(
                    AccountServiceError::Unauthorized { message }
                    | AccountServiceError::Rejected { message, .. },
                ) => {
                    warn!(email = %email, "login refused");
                    let message = Some(message).filter(|m| !m.trim().is_empty());
                    return Err(AuthError::InvalidCredentials { message });
                }
                Err(err) => return Err(err.into()),
            };

            let saved_at =
                DateTime::<Utc>::from_timestamp_millis(self.clock.now_ms()).unwrap_or_default();
            let user = reply.user.clone();
            self.auth_context
                .establish(StoredToken {
                    access_token: reply.access_token,
                    user: reply.user,
                    saved_at,
                })
                .await?;

            info!(user_id = %user.id, role = %user.role, "signed in");
            Ok(user)
        }
        .instrument(span)
        .await
    }
}
