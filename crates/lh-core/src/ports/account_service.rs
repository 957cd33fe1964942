//! Facade over the remote account backend.

use async_trait::async_trait;

use super::AccountServiceError;
use crate::account::{
    LoginResponse, ProfileCompletion, ProfileDraft, RegisterResponse, ResendCodeResponse, Role,
    VerifyEmailResponse,
};
use crate::ids::UserId;
use crate::security::SecretString;

/// Remote account operations used by the sign-up flow and by login.
///
/// Every call is a single attempt. Retry policy belongs to the caller.
#[async_trait]
pub trait AccountServicePort: Send + Sync {
    async fn register(
        &self,
        email: &str,
        password: &SecretString,
        role: Role,
    ) -> Result<RegisterResponse, AccountServiceError>;

    /// `code` is exactly six ASCII digits.
    async fn verify_email(
        &self,
        email: &str,
        code: &str,
    ) -> Result<VerifyEmailResponse, AccountServiceError>;

    async fn resend_code(&self, email: &str) -> Result<ResendCodeResponse, AccountServiceError>;

    /// Not idempotent as far as the client knows; call at most once per
    /// successful completion.
    async fn complete_profile(
        &self,
        user_id: &UserId,
        profile: &ProfileDraft,
    ) -> Result<ProfileCompletion, AccountServiceError>;

    async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, AccountServiceError>;
}
