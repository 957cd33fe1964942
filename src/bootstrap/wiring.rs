//! # Dependency Injection
//!
//! The only place that depends on `lh-app` and `lh-infra` together. It turns
//! the config DTO into concrete adapters and hands them out as port trait
//! objects. Assembly only: no business decisions here.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lh_app::{AuthContext, LoginUser, LogoutUser, SignupOrchestrator};
use lh_core::config::AppConfig;
use lh_core::ports::{AccountServicePort, ClockPort, SignupEventPort, TokenStorePort};
use lh_infra::account::DEFAULT_REQUEST_TIMEOUT;
use lh_infra::{FileTokenStore, HttpAccountService, SystemClock, TokioCooldownTimer};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_RESEND_COOLDOWN_SECS: u64 = 30;
pub const API_BASE_URL_ENV: &str = "LEARNHUB_API_BASE_URL";

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),

    #[error("Token store location unavailable: no local data directory")]
    TokenStorePath,
}

/// Config facts with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub resend_cooldown_secs: u64,
    pub token_file: PathBuf,
}

impl ResolvedSettings {
    /// `base_url_override` wins over the file; empty strings count as unset.
    pub fn resolve(
        config: &AppConfig,
        base_url_override: Option<String>,
        default_token_file: Option<PathBuf>,
    ) -> WiringResult<Self> {
        let api_base_url = base_url_override
            .filter(|url| !url.trim().is_empty())
            .or_else(|| Some(config.api.base_url.clone()).filter(|url| !url.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let request_timeout = match config.api.request_timeout_secs {
            0 => DEFAULT_REQUEST_TIMEOUT,
            secs => Duration::from_secs(secs),
        };

        let resend_cooldown_secs = match config.signup.resend_cooldown_secs {
            0 => DEFAULT_RESEND_COOLDOWN_SECS,
            secs => secs,
        };

        let token_file = if config.auth.token_file.as_os_str().is_empty() {
            default_token_file.ok_or(WiringError::TokenStorePath)?
        } else {
            config.auth.token_file.clone()
        };

        Ok(Self {
            api_base_url,
            request_timeout,
            resend_cooldown_secs,
            token_file,
        })
    }
}

/// Everything the front end needs, behind ports.
pub struct AppDeps {
    pub settings: ResolvedSettings,
    pub account_service: Arc<dyn AccountServicePort>,
    pub token_store: Arc<dyn TokenStorePort>,
    pub clock: Arc<dyn ClockPort>,
    pub auth_context: Arc<AuthContext>,
}

impl AppDeps {
    /// A fresh sign-up flow reporting to `event_port`.
    pub fn signup_flow(&self, event_port: Arc<dyn SignupEventPort>) -> SignupOrchestrator {
        let cooldown_timer = Arc::new(TokioCooldownTimer::new(event_port.clone()));
        SignupOrchestrator::new(
            self.account_service.clone(),
            event_port,
            self.clock.clone(),
            cooldown_timer,
            self.settings.resend_cooldown_secs,
        )
    }

    pub fn login_user(&self) -> LoginUser {
        LoginUser::new(
            self.account_service.clone(),
            self.auth_context.clone(),
            self.clock.clone(),
        )
    }

    pub fn logout_user(&self) -> LogoutUser {
        LogoutUser::new(self.auth_context.clone())
    }
}

/// Wire all dependencies from the loaded config.
///
/// Reads [`API_BASE_URL_ENV`] from the process environment.
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    let settings = ResolvedSettings::resolve(
        config,
        std::env::var(API_BASE_URL_ENV).ok(),
        FileTokenStore::default_path(),
    )?;
    wire_with_settings(settings)
}

pub fn wire_with_settings(settings: ResolvedSettings) -> WiringResult<AppDeps> {
    let account_service = HttpAccountService::new(&settings.api_base_url, settings.request_timeout)
        .map_err(|e| WiringError::HttpClientInit(e.to_string()))?;
    let token_store: Arc<dyn TokenStorePort> =
        Arc::new(FileTokenStore::new(settings.token_file.clone()));
    let auth_context = Arc::new(AuthContext::new(token_store.clone()));

    tracing::debug!(
        api_base_url = %settings.api_base_url,
        token_file = %settings.token_file.display(),
        "dependencies wired"
    );

    Ok(AppDeps {
        settings,
        account_service: Arc::new(account_service),
        token_store,
        clock: Arc::new(SystemClock),
        auth_context,
    })
}
