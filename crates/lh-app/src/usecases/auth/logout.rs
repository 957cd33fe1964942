use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use super::{AuthContext, AuthError};

/// Forget the signed-in user and delete the persisted token.
pub struct LogoutUser {
    auth_context: Arc<AuthContext>,
}

impl LogoutUser {
    pub fn new(auth_context: Arc<AuthContext>) -> Self {
        Self { auth_context }
    }

    pub async fn execute(&self) -> Result<(), AuthError> {
        let span = info_span!("usecase.logout_user.execute");

        async {
            let user = self.auth_context.current_user().await;
            self.auth_context.teardown().await?;
            match user {
                Some(user) => info!(user_id = %user.id, "signed out"),
                None => info!("sign out requested without a session"),
            }
            Ok(())
        }
        .instrument(span)
        .await
    }
}
