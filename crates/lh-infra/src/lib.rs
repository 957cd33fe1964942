//! Adapters behind the `lh-core` ports: the HTTP account backend, the token
//! file, the wall clock and the resend countdown.

pub mod account;
pub mod auth;
pub mod time;

pub use account::HttpAccountService;
pub use auth::FileTokenStore;
pub use time::{SystemClock, TokioCooldownTimer};
