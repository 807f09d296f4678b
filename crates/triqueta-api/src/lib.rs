//! Typed client for the Triqueta Digital API.
//!
//! Each service wraps one group of endpoints and goes through the
//! [`AuthenticatedApiClient`](triqueta_auth::AuthenticatedApiClient), so
//! bearer injection and session recovery apply to all of them. Non-success
//! responses surface as [`ApiError::Status`] with the server's `detail`.

mod api;
mod cache;
mod error;
mod favorites_controller;
mod http;
pub mod models;
mod services;

pub use api::TriquetaApi;
pub use cache::{favorites_keys, QueryCache, QueryKey};
pub use error::{message_from_detail, ApiError, ApiResult, FALLBACK_MESSAGE};
pub use favorites_controller::{FavoritesController, OPTIMISTIC_FAVORITE_ID};
pub use services::{
    ActivitiesService, AdminService, FavoritesService, RecommendationsService, UsersService,
    DEFAULT_EXECUTIONS_LIMIT, DEFAULT_PENDING_LIMIT,
};
