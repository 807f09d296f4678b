//! HTTP transport port and its reqwest adapter.

use crate::{ApiRequest, ApiResponse, AuthError, AuthResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Sends a request exactly as given and buffers the response.
///
/// Any status, including 401, is a successful dispatch; only failures to
/// obtain a response are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> AuthResult<ApiResponse>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Create a transport rooted at `base_url`; every call is bounded by `timeout`.
    pub fn new(base_url: Url, timeout: Duration) -> AuthResult<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http_client, base_url))
    }

    pub fn with_client(http_client: reqwest::Client, mut base_url: Url) -> Self {
        // Url::join drops the last segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> AuthResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

fn map_send_error(e: reqwest::Error) -> AuthError {
    if e.is_timeout() {
        AuthError::Timeout
    } else if e.is_connect() {
        AuthError::NetworkUnavailable(e.to_string())
    } else {
        AuthError::Http(e)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> AuthResult<ApiResponse> {
        let url = self.url_for(&request.path)?;

        let mut builder = self
            .http_client
            .request(request.method.clone(), url.clone())
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_send_error)?.to_vec();
        let response = ApiResponse::new(status, headers, body);

        debug!(
            method = %request.method,
            path = %url.path(),
            status = status.as_u16(),
            body = %response.body_summary(),
            "request completed"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let transport = ReqwestTransport::with_client(
            reqwest::Client::new(),
            Url::parse("http://localhost:8000/api/v1").unwrap(),
        );
        assert_eq!(transport.base_url().as_str(), "http://localhost:8000/api/v1/");
    }

    #[test]
    fn test_paths_resolve_under_base() {
        let transport = ReqwestTransport::with_client(
            reqwest::Client::new(),
            Url::parse("http://localhost:8000/api/v1/").unwrap(),
        );
        assert_eq!(
            transport.url_for("/favoritos/check/7").unwrap().as_str(),
            "http://localhost:8000/api/v1/favoritos/check/7"
        );
        assert_eq!(
            transport.url_for("auth/refresh").unwrap().as_str(),
            "http://localhost:8000/api/v1/auth/refresh"
        );
    }
}
