//! Authenticated API client.
//!
//! Attaches the stored bearer token to every call and recovers once from a
//! 401 by refreshing the credential pair and replaying the call. Concurrent
//! 401s share a single refresh.

use crate::models::AuthTokens;
use crate::request_fsm::{RequestInput, RequestLifecycle};
use crate::{
    is_auth_view, ApiRequest, ApiResponse, AuthError, AuthResult, HttpTransport, RefreshFailure,
    ReqwestTransport, SessionNavigator, REFRESH_PATH,
};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use triqueta_config_and_utils::Config;
use triqueta_storage::{CredentialsPair, TokenStore};

type RefreshOutcome = Result<CredentialsPair, RefreshFailure>;
type PendingRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

/// HTTP client for the API that keeps the session alive.
///
/// Cheap to clone; clones share the transport, the token store and the
/// in-flight refresh.
#[derive(Clone)]
pub struct AuthenticatedApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn SessionNavigator>,
    refresh_in_flight: Mutex<Option<PendingRefresh>>,
}

impl AuthenticatedApiClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn SessionNavigator>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                tokens,
                navigator,
                refresh_in_flight: Mutex::new(None),
            }),
        }
    }

    /// Client talking to `config.api_url` over reqwest with the configured timeout.
    pub fn from_config(
        config: &Config,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn SessionNavigator>,
    ) -> AuthResult<Self> {
        let transport = ReqwestTransport::new(config.api_url()?, config.request_timeout())?;
        Ok(Self::new(Arc::new(transport), tokens, navigator))
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.tokens
    }

    /// Send a request with the current access token.
    ///
    /// Non-401 responses come back untouched. A 401 from a protected
    /// endpoint triggers one refresh and one replay; the replay's response
    /// is returned whatever its status. If the refresh fails the stored
    /// credentials are cleared, the user is sent to login and
    /// [`AuthError::SessionExpired`] is returned. Transport errors are
    /// returned as-is and never trigger a refresh.
    pub async fn send(&self, mut request: ApiRequest) -> AuthResult<ApiResponse> {
        let mut lifecycle = RequestLifecycle::new(&request.method, &request.path);

        let sent_token = self.inner.tokens.access_token()?;
        lifecycle.advance(RequestInput::Dispatch)?;
        let response = match self.dispatch(&mut request, sent_token.as_deref()).await {
            Ok(response) => response,
            Err(e) => {
                lifecycle.advance(RequestInput::TransportFailed)?;
                return Err(e);
            }
        };

        if !response.is_unauthorized() {
            lifecycle.advance(RequestInput::Completed)?;
            return Ok(response);
        }
        if request.is_auth_endpoint() {
            lifecycle.advance(RequestInput::AuthEndpointRejected)?;
            return Ok(response);
        }
        if request.is_retried() {
            lifecycle.advance(RequestInput::AlreadyRetried)?;
            return Ok(response);
        }

        lifecycle.advance(RequestInput::Unauthorized)?;
        request.mark_retried();
        debug!(method = %request.method, path = %request.path, "unauthorized, recovering session");

        let token = match self.recover(sent_token.as_deref()).await {
            Ok(token) => token,
            Err(failure) => {
                lifecycle.advance(RequestInput::RefreshFailed)?;
                return Err(AuthError::SessionExpired(failure));
            }
        };
        lifecycle.advance(RequestInput::RefreshSucceeded)?;

        match self.dispatch(&mut request, Some(&token)).await {
            Ok(response) => {
                lifecycle.advance(RequestInput::Completed)?;
                Ok(response)
            }
            Err(e) => {
                lifecycle.advance(RequestInput::TransportFailed)?;
                Err(e)
            }
        }
    }

    /// Exchange the stored refresh token for a new pair.
    ///
    /// Only one refresh runs at a time: callers arriving while one is in
    /// flight await the same outcome. On failure the stored pair is cleared
    /// and the navigator is asked to show the login view, once per failed
    /// refresh.
    pub async fn refresh(&self) -> Result<CredentialsPair, RefreshFailure> {
        let pending = {
            let mut slot = self.inner.refresh_in_flight.lock();
            match slot.as_ref() {
                Some(pending) => {
                    debug!("joining in-flight token refresh");
                    pending.clone()
                }
                None => {
                    let pending = run_refresh(
                        Arc::clone(&self.inner.transport),
                        Arc::clone(&self.inner.tokens),
                        Arc::clone(&self.inner.navigator),
                    )
                    .boxed()
                    .shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };

        let outcome = pending.clone().await;

        let mut slot = self.inner.refresh_in_flight.lock();
        if slot
            .as_ref()
            .is_some_and(|current| current.ptr_eq(&pending))
        {
            *slot = None;
        }

        outcome
    }

    /// Token to replay with after a 401.
    ///
    /// If the stored access token is no longer the one the call was sent
    /// with, another call already rotated the pair and it is reused as is.
    async fn recover(&self, sent_token: Option<&str>) -> Result<String, RefreshFailure> {
        let current = self
            .inner
            .tokens
            .access_token()
            .map_err(|e| RefreshFailure::Storage(e.to_string()))?;

        if let Some(current) = current {
            if sent_token != Some(current.as_str()) {
                debug!("credentials already rotated, replaying without refresh");
                return Ok(current);
            }
        }

        Ok(self.refresh().await?.access_token)
    }

    async fn dispatch(
        &self,
        request: &mut ApiRequest,
        token: Option<&str>,
    ) -> AuthResult<ApiResponse> {
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| AuthError::MalformedToken)?;
            value.set_sensitive(true);
            request.headers.insert(AUTHORIZATION, value);
        }
        self.inner.transport.execute(request).await
    }
}

impl fmt::Debug for AuthenticatedApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedApiClient")
            .field("refresh_in_flight", &self.inner.refresh_in_flight.lock().is_some())
            .finish_non_exhaustive()
    }
}

async fn run_refresh(
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn SessionNavigator>,
) -> RefreshOutcome {
    info!("refreshing access token");

    match request_new_pair(transport.as_ref(), tokens.as_ref()).await {
        Ok(pair) => {
            info!("access token refreshed");
            Ok(pair)
        }
        Err(failure) => {
            warn!(error = %failure, "token refresh failed, clearing session");
            if let Err(e) = tokens.clear() {
                warn!(error = %e, "failed to clear stored credentials");
            }
            match navigator.current_view() {
                Some(view) if is_auth_view(&view) => {
                    debug!(view = %view, "already on an auth view, not redirecting");
                }
                _ => navigator.redirect_to_login(),
            }
            Err(failure)
        }
    }
}

async fn request_new_pair(
    transport: &dyn HttpTransport,
    tokens: &dyn TokenStore,
) -> RefreshOutcome {
    let refresh_token = tokens
        .refresh_token()
        .map_err(|e| RefreshFailure::Storage(e.to_string()))?
        .ok_or(RefreshFailure::MissingRefreshToken)?;

    // Sent straight through the transport: no bearer header, no recovery.
    let mut request = ApiRequest::post(REFRESH_PATH);
    request.body = Some(json!({ "refresh_token": refresh_token }));

    let response = transport
        .execute(&request)
        .await
        .map_err(|e| RefreshFailure::Transport(e.to_string()))?;

    if !response.is_success() {
        warn!(
            status = response.status().as_u16(),
            body = %response.body_summary(),
            "refresh rejected"
        );
        return Err(RefreshFailure::Rejected(response.status().as_u16()));
    }

    let pair = response
        .json::<AuthTokens>()
        .map_err(|e| RefreshFailure::InvalidResponse(e.to_string()))?
        .into_pair();

    tokens
        .set(&pair)
        .map_err(|e| RefreshFailure::Storage(e.to_string()))?;

    Ok(pair)
}
