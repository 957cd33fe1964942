//! HTTP adapter for the account backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use lh_core::account::{
    LoginResponse, ProfileCompletion, ProfileDraft, RegisterResponse, ResendCodeResponse, Role,
    VerifyEmailResponse,
};
use lh_core::ids::UserId;
use lh_core::ports::{AccountServiceError, AccountServicePort};
use lh_core::security::SecretString;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    role: Role,
}

#[derive(Serialize)]
struct VerifyEmailRequest<'a> {
    email: &'a str,
    code: &'a str,
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

pub struct HttpAccountService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAccountService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, AccountServiceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4().to_string();
        debug!(path, request_id = %request_id, "account service request");

        let response = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
            warn!(
                path,
                request_id = %request_id,
                status = status.as_u16(),
                message = %message,
                "account service refused request"
            );
            return Err(map_status_code(status, message));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(path, request_id = %request_id, error = %e, "account service reply did not decode");
            AccountServiceError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl AccountServicePort for HttpAccountService {
    async fn register(
        &self,
        email: &str,
        password: &SecretString,
        role: Role,
    ) -> Result<RegisterResponse, AccountServiceError> {
        let body = RegisterRequest {
            email,
            password: password.expose(),
            role,
        };
        self.post("/register", &body).await
    }

    async fn verify_email(
        &self,
        email: &str,
        code: &str,
    ) -> Result<VerifyEmailResponse, AccountServiceError> {
        self.post("/verify-email", &VerifyEmailRequest { email, code })
            .await
    }

    async fn resend_code(&self, email: &str) -> Result<ResendCodeResponse, AccountServiceError> {
        let reply: ResendCodeResponse = self.post("/resend-code", &EmailRequest { email }).await?;
        if !reply.success {
            return Err(AccountServiceError::Rejected {
                status: StatusCode::OK.as_u16(),
                message: reply.message.unwrap_or_default(),
            });
        }
        Ok(reply)
    }

    async fn complete_profile(
        &self,
        user_id: &UserId,
        profile: &ProfileDraft,
    ) -> Result<ProfileCompletion, AccountServiceError> {
        self.post(&format!("/complete-profile/{user_id}"), profile)
            .await
    }

    async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, AccountServiceError> {
        let body = LoginRequest {
            email,
            password: password.expose(),
        };
        self.post("/login", &body).await
    }
}

fn map_transport_error(error: reqwest::Error) -> AccountServiceError {
    if error.is_timeout() {
        AccountServiceError::Timeout
    } else if error.is_decode() {
        AccountServiceError::Decode(error.to_string())
    } else {
        // reqwest::Error renders the URL but never the request body
        AccountServiceError::Network(error.to_string())
    }
}

fn map_status_code(code: StatusCode, message: String) -> AccountServiceError {
    match code {
        StatusCode::CONFLICT => AccountServiceError::Conflict { message },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AccountServiceError::Unauthorized { message }
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => AccountServiceError::Timeout,
        _ if code.is_server_error() => {
            AccountServiceError::Network(format!("server error {}: {message}", code.as_u16()))
        }
        _ => AccountServiceError::Rejected {
            status: code.as_u16(),
            message,
        },
    }
}
