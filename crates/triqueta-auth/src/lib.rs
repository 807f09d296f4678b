//! Authenticated access to the Triqueta Digital API.
//!
//! This crate provides:
//! - An HTTP transport port with a reqwest adapter bounded by a timeout
//! - `AuthenticatedApiClient`: bearer injection, one refresh-and-replay per
//!   401, single-flight refresh shared by concurrent callers
//! - An explicit FSM for the per-request lifecycle
//! - `AuthService` for login, registration, logout and the current user

mod client;
mod error;
mod models;
mod navigator;
mod request;
mod request_fsm;
mod session;
mod transport;

#[cfg(test)]
mod test_support;

pub use client::AuthenticatedApiClient;
pub use error::{AuthError, AuthResult, RefreshFailure};
pub use models::{AuthTokens, LoginRequest, RegisterRequest, User, UserProfile};
pub use navigator::{is_auth_view, NoopNavigator, SessionNavigator};
pub use request::{ApiRequest, ApiResponse, LOGIN_PATH, REFRESH_PATH, REGISTER_PATH};
pub use request_fsm::request_machine;
pub use request_fsm::{RequestInput, RequestMachine, RequestState};
pub use session::{AuthService, AuthStatus};
pub use transport::{HttpTransport, ReqwestTransport};
