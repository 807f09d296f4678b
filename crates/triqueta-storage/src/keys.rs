//! Storage key constants.

/// Storage keys used by the client
pub struct StorageKeys;

impl StorageKeys {
    /// Bearer access token
    pub const ACCESS_TOKEN: &'static str = "access_token";

    /// Refresh token used to mint a new pair
    pub const REFRESH_TOKEN: &'static str = "refresh_token";
}
