//! Authentication context and the login / logout use cases.

mod context;
mod login;
mod logout;

pub use context::AuthContext;
pub use login::LoginUser;
pub use logout::LogoutUser;

use lh_core::ports::{AccountServiceError, TokenStoreError};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidEmail(String),

    #[error("{}", message.as_deref().unwrap_or("Invalid email or password"))]
    InvalidCredentials { message: Option<String> },

    #[error("account service error: {0}")]
    Service(#[from] AccountServiceError),

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
}
