use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub signup: SignupConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the account backend (may be empty - this is a fact, not an error)
    pub base_url: String,
    /// Per-request timeout; zero when unset
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupConfig {
    /// Client-side wait between verification code requests; zero when unset
    pub resend_cooldown_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    /// Access token file (path info only, no existence check)
    pub token_file: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let section = |name: &str, key: &str| toml_value.get(name).and_then(|s| s.get(key));

        Ok(Self {
            api: ApiConfig {
                base_url: section("api", "base_url")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string(),
                request_timeout_secs: section("api", "request_timeout_secs")
                    .and_then(|v| v.as_integer())
                    .unwrap_or(0)
                    .max(0) as u64,
            },
            signup: SignupConfig {
                resend_cooldown_secs: section("signup", "resend_cooldown_secs")
                    .and_then(|v| v.as_integer())
                    .unwrap_or(0)
                    .max(0) as u64,
            },
            auth: AuthConfig {
                token_file: PathBuf::from(
                    section("auth", "token_file")
                        .and_then(|v| v.as_str())
                        .unwrap_or(""),
                ),
            },
        })
    }
}
