use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use lh_core::account::AuthenticatedUser;
use lh_core::ports::{StoredToken, TokenStoreError, TokenStorePort};

use super::AuthError;

/// Process-wide authentication state.
///
/// Holds the signed-in user and access token in memory, mirrored to the
/// token store. Constructed once at bootstrap and shared by reference.
pub struct AuthContext {
    token_store: Arc<dyn TokenStorePort>,
    session: RwLock<Option<StoredToken>>,
}

impl AuthContext {
    pub fn new(token_store: Arc<dyn TokenStorePort>) -> Self {
        Self {
            token_store,
            session: RwLock::new(None),
        }
    }

    /// Restore a persisted session.
    ///
    /// A corrupt token file is cleared and treated as signed out.
    pub async fn init(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
        let restored = match self.token_store.load().await {
            Ok(token) => token,
            Err(TokenStoreError::Corrupt(reason)) => {
                warn!(reason = %reason, "discarding corrupt access token");
                self.token_store.clear().await?;
                None
            }
            Err(err) => return Err(err.into()),
        };

        let user = restored.as_ref().map(|token| token.user.clone());
        if let Some(user) = &user {
            info!(user_id = %user.id, role = %user.role, "restored signed-in session");
        }
        *self.session.write().await = restored;
        Ok(user)
    }

    pub async fn current_user(&self) -> Option<AuthenticatedUser> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|token| token.user.clone())
    }

    pub async fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|token| token.access_token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Persist first so memory never claims a session the store lost.
    pub(crate) async fn establish(&self, token: StoredToken) -> Result<(), AuthError> {
        self.token_store.save(&token).await?;
        *self.session.write().await = Some(token);
        Ok(())
    }

    /// Memory is cleared even when the store fails.
    pub(crate) async fn teardown(&self) -> Result<(), AuthError> {
        self.session.write().await.take();
        self.token_store.clear().await?;
        Ok(())
    }
}
