//! Fakes shared by the unit tests in this crate.

use crate::{ApiRequest, ApiResponse, AuthResult, HttpTransport, SessionNavigator, REFRESH_PATH};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Handler = Box<dyn Fn(&ApiRequest) -> AuthResult<ApiResponse> + Send + Sync>;

/// Transport that answers from a closure and records every request.
pub(crate) struct FakeTransport {
    handler: Handler,
    requests: Mutex<Vec<ApiRequest>>,
    refresh_delay: Duration,
}

impl FakeTransport {
    pub(crate) fn new<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> AuthResult<ApiResponse> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            refresh_delay: Duration::ZERO,
        }
    }

    /// Hold refresh calls open for `delay` so concurrent callers overlap.
    pub(crate) fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.path == path)
            .count()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn execute(&self, request: &ApiRequest) -> AuthResult<ApiResponse> {
        self.requests.lock().push(request.clone());
        if request.path == REFRESH_PATH && !self.refresh_delay.is_zero() {
            tokio::time::sleep(self.refresh_delay).await;
        }
        (self.handler)(request)
    }
}

/// Navigator that remembers how often it was asked to redirect.
pub(crate) struct RecordingNavigator {
    view: Mutex<Option<String>>,
    redirects: AtomicUsize,
}

impl RecordingNavigator {
    pub(crate) fn at(view: &str) -> Self {
        Self {
            view: Mutex::new(Some(view.to_string())),
            redirects: AtomicUsize::new(0),
        }
    }

    pub(crate) fn set_view(&self, view: &str) {
        *self.view.lock() = Some(view.to_string());
    }

    pub(crate) fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl SessionNavigator for RecordingNavigator {
    fn current_view(&self) -> Option<String> {
        self.view.lock().clone()
    }

    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
        *self.view.lock() = Some("/login".to_string());
    }
}

pub(crate) fn bearer(request: &ApiRequest) -> Option<String> {
    request
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

pub(crate) fn status(code: StatusCode) -> ApiResponse {
    ApiResponse::new(code, HeaderMap::new(), Vec::new())
}

pub(crate) fn ok_json(body: Value) -> ApiResponse {
    ApiResponse::from_json(StatusCode::OK, &body)
}

pub(crate) fn tokens_response(access: &str, refresh: &str) -> ApiResponse {
    ok_json(json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer"
    }))
}
