//! Account operations: login, registration, logout and the current user.

use crate::models::{AuthTokens, LoginRequest, RegisterRequest, User};
use crate::{ApiRequest, ApiResponse, AuthError, AuthResult, AuthenticatedApiClient, LOGIN_PATH, REGISTER_PATH};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

const LOGOUT_PATH: &str = "auth/logout";
const ME_PATH: &str = "auth/me";

/// Authentication status.
#[derive(Debug, Clone)]
pub enum AuthStatus {
    /// Stored credentials are accepted by the server.
    LoggedIn { user: User },
    /// No credentials stored.
    NotLoggedIn,
    /// Credentials were stored but could not be used or renewed.
    Expired,
}

/// Account operations on top of an [`AuthenticatedApiClient`].
#[derive(Clone, Debug)]
pub struct AuthService {
    client: AuthenticatedApiClient,
}

impl AuthService {
    pub fn new(client: AuthenticatedApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthenticatedApiClient {
        &self.client
    }

    /// Log in and store the returned pair.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<AuthTokens> {
        let request = ApiRequest::post(LOGIN_PATH).json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;

        let response = self.client.send(request).await?;
        if response.is_unauthorized() {
            return Err(AuthError::InvalidCredentials(detail_or(
                &response,
                "Incorrect email or password",
            )));
        }

        let tokens: AuthTokens = ensure_success(response)?.json()?;
        self.client.token_store().set(&tokens.clone().into_pair())?;
        info!("logged in");
        Ok(tokens)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> AuthResult<User> {
        let response = self
            .client
            .send(ApiRequest::post(REGISTER_PATH).json(request)?)
            .await?;
        let user: User = ensure_success(response)?.json()?;
        info!(user_id = user.id, "account registered");
        Ok(user)
    }

    /// Create an account and log straight into it.
    pub async fn register_and_login(&self, request: &RegisterRequest) -> AuthResult<User> {
        let user = self.register(request).await?;
        self.login(&request.email, &request.password).await?;
        Ok(user)
    }

    /// Revoke the refresh token server-side if possible and forget the pair.
    ///
    /// The server call is best-effort; local credentials are cleared whatever
    /// it returns.
    pub async fn logout(&self) -> AuthResult<()> {
        let store = self.client.token_store();

        if let Some(refresh_token) = store.refresh_token()? {
            let request =
                ApiRequest::post(LOGOUT_PATH).json(&json!({ "refresh_token": refresh_token }))?;
            match self.client.send(request).await {
                Ok(response) if response.is_success() => debug!("server session revoked"),
                Ok(response) => warn!(
                    status = response.status().as_u16(),
                    "server logout rejected, clearing locally"
                ),
                Err(e) => warn!(error = %e, "server logout failed, clearing locally"),
            }
        }

        store.clear()?;
        info!("logged out");
        Ok(())
    }

    /// The account behind the stored credentials.
    pub async fn current_user(&self) -> AuthResult<User> {
        let response = self.client.send(ApiRequest::get(ME_PATH)).await?;
        Ok(ensure_success(response)?.json()?)
    }

    /// True when an access token is stored. Does not contact the server.
    pub fn is_authenticated(&self) -> AuthResult<bool> {
        Ok(self.client.token_store().is_authenticated()?)
    }

    /// Check the stored credentials against the server.
    pub async fn status(&self) -> AuthResult<AuthStatus> {
        if !self.is_authenticated()? {
            return Ok(AuthStatus::NotLoggedIn);
        }

        match self.current_user().await {
            Ok(user) => Ok(AuthStatus::LoggedIn { user }),
            Err(e) if e.requires_login() => Ok(AuthStatus::Expired),
            Err(AuthError::UnexpectedStatus { status: 401, .. }) => Ok(AuthStatus::Expired),
            Err(e) => Err(e),
        }
    }
}

fn ensure_success(response: ApiResponse) -> AuthResult<ApiResponse> {
    if response.is_success() {
        return Ok(response);
    }
    warn!(
        status = response.status().as_u16(),
        body = %response.body_summary(),
        "auth request failed"
    );
    Err(AuthError::UnexpectedStatus {
        status: response.status().as_u16(),
        body: response.text(),
    })
}

fn detail_or(response: &ApiResponse, fallback: &str) -> String {
    response
        .json::<Value>()
        .ok()
        .and_then(|body| body.get("detail").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| fallback.to_string())
}
