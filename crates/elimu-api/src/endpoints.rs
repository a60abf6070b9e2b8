//! Typed wrappers for the backend endpoints the storefront calls.

use elimu_model::{
    AuthSession, LoginRequest, LoginResponse, NormalizedResource, PaymentReceipt, PaymentRequest,
    PaymentStatus, RegisterRequest, UserProfile, normalize_all,
};
use serde_json::Value;

use crate::cancel::CancellationToken;
use crate::client::{ApiClient, AuthMode, RequestOptions};
use crate::error::{ApiError, Result, message_from_body};

/// `GET /resources/`
pub const RESOURCES_PATH: &str = "/resources/";
/// `POST /users/register/`
pub const REGISTER_PATH: &str = "/users/register/";
/// `POST /users/auth/login/`
pub const LOGIN_PATH: &str = "/users/auth/login/";
/// `POST /token/`, the login endpoint of older backends.
pub const LEGACY_TOKEN_PATH: &str = "/token/";
/// `GET /users/me/`
pub const ME_PATH: &str = "/users/me/";
/// `POST /payment/initiate/`
pub const PAYMENT_INITIATE_PATH: &str = "/payment/initiate/";

/// `GET /resources/{id}/is-paid-for`
#[must_use]
pub fn is_paid_for_path(resource_id: i64) -> String {
    format!("/resources/{resource_id}/is-paid-for")
}

impl ApiClient {
    /// Fetch and normalize the public resource listing.
    pub async fn fetch_resources(&self) -> Result<Vec<NormalizedResource>> {
        self.fetch_resources_cancellable(&CancellationToken::never())
            .await
    }

    /// Fetch the resource listing, abandoning it when `cancel` fires.
    pub async fn fetch_resources_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<NormalizedResource>> {
        let listing = self
            .request_cancellable(RESOURCES_PATH, RequestOptions::get(), cancel)
            .await?
            .unwrap_or(Value::Array(Vec::new()));

        let resources = normalize_all(&listing);
        tracing::info!("Fetched {} resources", resources.len());
        Ok(resources)
    }

    /// Create an account.
    ///
    /// Returns the backend's confirmation message.
    pub async fn register(&self, request: &RegisterRequest) -> Result<String> {
        tracing::info!("Registering account for {}", request.email);
        let body = serde_json::to_value(request)?;
        let response = self
            .request(REGISTER_PATH, RequestOptions::post(body))
            .await?;

        Ok(response
            .as_ref()
            .and_then(|value| value.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("User registered successfully.")
            .to_string())
    }

    /// Sign in and store the session in the injected auth store.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthSession> {
        self.login_at(LOGIN_PATH, request).await
    }

    /// Sign in through the `/token/` endpoint of older backends, which answer
    /// with `access` instead of `token`.
    pub async fn login_legacy(&self, request: &LoginRequest) -> Result<AuthSession> {
        self.login_at(LEGACY_TOKEN_PATH, request).await
    }

    async fn login_at(&self, path: &str, request: &LoginRequest) -> Result<AuthSession> {
        tracing::info!("Attempting login for {}", request.email);
        let body = serde_json::to_value(request)?;

        let response: LoginResponse = self
            .request_as(path, RequestOptions::post(body), &CancellationToken::never())
            .await
            .map_err(login_error)?;

        let session = AuthSession::from(response);
        self.auth().set_session(session.clone())?;
        tracing::info!("Login succeeded for {}", request.email);
        Ok(session)
    }

    /// Forget the stored session.
    pub fn logout(&self) -> Result<()> {
        tracing::info!("Logging out");
        self.auth().clear()
    }

    /// Whether a token is stored.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.auth().get_token().is_some()
    }

    /// Profile of the signed-in user, refreshed from the backend.
    pub async fn me(&self) -> Result<UserProfile> {
        let profile: UserProfile = self
            .request_as(
                ME_PATH,
                RequestOptions::get().with_auth(AuthMode::Required),
                &CancellationToken::never(),
            )
            .await?;

        if let Some(mut session) = self.auth().session() {
            session.user = Some(profile.clone());
            self.auth().set_session(session)?;
        }
        Ok(profile)
    }

    /// Whether the signed-in user has unlocked `resource_id`.
    pub async fn is_paid_for(&self, resource_id: i64) -> Result<bool> {
        tracing::debug!("Checking payment status for resource {}", resource_id);
        let status: PaymentStatus = self
            .request_as(
                &is_paid_for_path(resource_id),
                RequestOptions::get().with_auth(AuthMode::Optional),
                &CancellationToken::never(),
            )
            .await?;
        Ok(status.is_paid)
    }

    /// Ask the backend to send an M-Pesa STK push for `request`.
    pub async fn initiate_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt> {
        tracing::info!(
            "Initiating M-Pesa payment for resource {}",
            request.resource_id
        );
        let body = serde_json::to_value(request)?;
        let receipt: PaymentReceipt = self
            .request(
                PAYMENT_INITIATE_PATH,
                RequestOptions::post(body).with_auth(AuthMode::Required),
            )
            .await?
            .map(serde_json::from_value)
            .transpose()?
            .unwrap_or_default();
        Ok(receipt)
    }
}

/// Login failures prefer `detail`, then `message`, then a generic text.
fn login_error(err: ApiError) -> ApiError {
    match err {
        ApiError::Http { status, body, .. } => {
            let message = message_from_body(&body, &["detail", "message"])
                .unwrap_or_else(|| "Invalid credentials".to_string());
            tracing::error!("Login failed: {}", message);
            ApiError::Http {
                status,
                message,
                body,
            }
        }
        other => other,
    }
}
