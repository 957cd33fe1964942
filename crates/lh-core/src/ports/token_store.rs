use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TokenStoreError;
use crate::account::AuthenticatedUser;

/// Access token persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub user: AuthenticatedUser,
    pub saved_at: DateTime<Utc>,
}

#[async_trait]
pub trait TokenStorePort: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<StoredToken>, TokenStoreError>;
    async fn save(&self, token: &StoredToken) -> Result<(), TokenStoreError>;
    /// Idempotent.
    async fn clear(&self) -> Result<(), TokenStoreError>;
}
