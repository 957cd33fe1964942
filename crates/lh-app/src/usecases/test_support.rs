//! Mock ports shared by the use case tests.

use async_trait::async_trait;
use mockall::mock;

use lh_core::account::{
    LoginResponse, ProfileCompletion, ProfileDraft, RegisterResponse, ResendCodeResponse, Role,
    VerifyEmailResponse,
};
use lh_core::ids::UserId;
use lh_core::ports::{
    AccountServiceError, AccountServicePort, StoredToken, TokenStoreError, TokenStorePort,
};
use lh_core::security::SecretString;

mock! {
    pub AccountService {}

    #[async_trait]
    impl AccountServicePort for AccountService {
        async fn register(
            &self,
            email: &str,
            password: &SecretString,
            role: Role,
        ) -> Result<RegisterResponse, AccountServiceError>;
        async fn verify_email(
            &self,
            email: &str,
            code: &str,
        ) -> Result<VerifyEmailResponse, AccountServiceError>;
        async fn resend_code(&self, email: &str) -> Result<ResendCodeResponse, AccountServiceError>;
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
}

mock! {
    pub TokenStore {}

    #[async_trait]
    impl TokenStorePort for TokenStore {
        async fn load(&self) -> Result<Option<StoredToken>, TokenStoreError>;
        async fn save(&self, token: &StoredToken) -> Result<(), TokenStoreError>;
        async fn clear(&self) -> Result<(), TokenStoreError>;
    }
}
