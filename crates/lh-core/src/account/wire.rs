//! Replies of the account backend.
//!
//! Field names follow the backend's camelCase JSON.

use serde::{Deserialize, Serialize};

use super::Role;
use crate::ids::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailResponse {
    pub user_id: UserId,
    pub role: Role,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendCodeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of the profile-completion call.
///
/// Carries no access token; a separate login establishes the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCompletion {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    pub full_name: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    #[serde(alias = "userId", alias = "_id")]
    pub id: UserId,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: AuthenticatedUser,
    pub access_token: String,
}
