//! Shared request plumbing for the typed services.

use crate::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;
use triqueta_auth::{ApiRequest, ApiResponse, AuthenticatedApiClient};

/// Send and turn any non-success status into [`ApiError::Status`].
pub(crate) async fn execute(
    client: &AuthenticatedApiClient,
    request: ApiRequest,
) -> ApiResult<ApiResponse> {
    let method = request.method.clone();
    let path = request.path.clone();
    let response = client.send(request).await?;
    if response.is_success() {
        return Ok(response);
    }

    warn!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        body = %response.body_summary(),
        "api request failed"
    );

    let detail = response
        .json::<Value>()
        .ok()
        .and_then(|body| body.get("detail").cloned());
    Err(ApiError::Status {
        status: response.status().as_u16(),
        detail,
    })
}

/// Send and decode the JSON body.
pub(crate) async fn fetch<T: DeserializeOwned>(
    client: &AuthenticatedApiClient,
    request: ApiRequest,
) -> ApiResult<T> {
    Ok(execute(client, request).await?.json()?)
}
