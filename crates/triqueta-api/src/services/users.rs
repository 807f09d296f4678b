//! `/users`: the account and its profile.

use crate::http::{execute, fetch};
use crate::models::{ProfileUpdate, User, UserProfile};
use crate::ApiResult;
use tracing::info;
use triqueta_auth::{ApiRequest, AuthenticatedApiClient};

#[derive(Clone, Debug)]
pub struct UsersService {
    client: AuthenticatedApiClient,
}

impl UsersService {
    pub fn new(client: AuthenticatedApiClient) -> Self {
        Self { client }
    }

    /// The current account with its profile.
    pub async fn me(&self) -> ApiResult<User> {
        fetch(&self.client, ApiRequest::get("users/me")).await
    }

    pub async fn update_profile(&self, changes: &ProfileUpdate) -> ApiResult<UserProfile> {
        fetch(
            &self.client,
            ApiRequest::put("users/me/profile").json(changes)?,
        )
        .await
    }

    /// Delete the current account and forget its credentials.
    pub async fn delete_account(&self) -> ApiResult<()> {
        execute(&self.client, ApiRequest::delete("users/me")).await?;
        self.client
            .token_store()
            .clear()
            .map_err(triqueta_auth::AuthError::from)?;
        info!("account deleted");
        Ok(())
    }

    pub async fn get(&self, user_id: i64) -> ApiResult<User> {
        fetch(&self.client, ApiRequest::get(format!("users/{}", user_id))).await
    }
}
