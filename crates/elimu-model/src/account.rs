//! Account payloads exchanged with the `/users/` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};

/// Body of `POST /users/register/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email, also used as the username.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl RegisterRequest {
    /// Build a request, rejecting an empty email or password.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let email = email.into().trim().to_string();
        let password = password.into();
        if email.is_empty() {
            return Err(ModelError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(ModelError::MissingField("password"));
        }
        Ok(Self {
            email,
            password,
            name: name.into(),
        })
    }
}

/// Body of `POST /users/auth/login/`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl LoginRequest {
    /// Build a request, rejecting an empty email or password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let email = email.into().trim().to_string();
        let password = password.into();
        if email.is_empty() {
            return Err(ModelError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(ModelError::MissingField("password"));
        }
        Ok(Self { email, password })
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User profile as returned by login and `GET /users/me/`.
///
/// Unknown fields are kept in `extra` so nothing the backend adds is lost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Username (the email for accounts created through registration).
    #[serde(default)]
    pub username: Option<String>,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl UserProfile {
    /// Name to greet the user with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.email.as_deref())
            .or(self.username.as_deref())
            .unwrap_or("Guest")
    }
}

/// Successful login response.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    /// Access token; older backends name it `access`.
    #[serde(alias = "access")]
    pub token: String,
    /// Refresh token.
    #[serde(default)]
    pub refresh: Option<String>,
    /// Profile of the logged-in user.
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"[REDACTED]")
            .field("refresh", &self.refresh.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

/// Everything persisted about the signed-in user.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token.
    pub access_token: String,
    /// Refresh token, when the backend issued one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Cached profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl From<LoginResponse> for AuthSession {
    fn from(response: LoginResponse) -> Self {
        Self {
            access_token: response.token,
            refresh_token: response.refresh,
            user: response.user,
        }
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}
