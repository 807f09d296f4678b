//! Credential pair persistence.

use crate::{KeyValueStorage, StorageKeys, StorageResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// An access/refresh token pair as returned by the login and refresh endpoints.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl CredentialsPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for CredentialsPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsPair")
            .field("access_token", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .finish()
    }
}

/// Snapshot of whatever is currently stored. Either half may be missing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StoredTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for StoredTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredTokens")
            .field("access_token", &self.access_token.as_ref().map(|_| "[redacted]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// Durable holder of the credential pair.
///
/// Reads must reflect the latest write. `set` and `clear` replace or remove
/// both halves together: a reader never sees a new access token next to an
/// old refresh token.
pub trait TokenStore: Send + Sync {
    /// Both halves as currently stored.
    fn tokens(&self) -> StorageResult<StoredTokens>;

    /// Replace both halves.
    fn set(&self, pair: &CredentialsPair) -> StorageResult<()>;

    /// Remove both halves.
    fn clear(&self) -> StorageResult<()>;

    fn access_token(&self) -> StorageResult<Option<String>> {
        Ok(self.tokens()?.access_token)
    }

    fn refresh_token(&self) -> StorageResult<Option<String>> {
        Ok(self.tokens()?.refresh_token)
    }

    /// True when an access token is present. Says nothing about its validity.
    fn is_authenticated(&self) -> StorageResult<bool> {
        Ok(self.access_token()?.is_some())
    }
}

/// [`TokenStore`] over any [`KeyValueStorage`] backend.
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        // An empty value is as good as no value.
        Ok(self.storage.get(key)?.filter(|value| !value.is_empty()))
    }
}

impl TokenStore for CredentialStore {
    fn tokens(&self) -> StorageResult<StoredTokens> {
        Ok(StoredTokens {
            access_token: self.read(StorageKeys::ACCESS_TOKEN)?,
            refresh_token: self.read(StorageKeys::REFRESH_TOKEN)?,
        })
    }

    fn set(&self, pair: &CredentialsPair) -> StorageResult<()> {
        self.storage.set_many(&[
            (StorageKeys::ACCESS_TOKEN, pair.access_token.as_str()),
            (StorageKeys::REFRESH_TOKEN, pair.refresh_token.as_str()),
        ])?;
        tracing::debug!("credentials stored");
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.storage
            .delete_many(&[StorageKeys::ACCESS_TOKEN, StorageKeys::REFRESH_TOKEN])?;
        tracing::debug!("credentials cleared");
        Ok(())
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}
