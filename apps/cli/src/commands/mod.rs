//! CLI command implementations.

mod activities;
mod admin;
mod auth;
mod favorites;
mod recommendations;

pub use activities::{activities_list, activities_show};
pub use admin::{
    admin_approve, admin_dashboard, admin_etl_run, admin_etl_runs, admin_etl_status,
    admin_etl_trigger, admin_pending, admin_reject,
};
pub use auth::{login, logout, me, register, status};
pub use favorites::{favorites_add, favorites_check, favorites_count, favorites_list, favorites_remove};
pub use recommendations::recommendations;

use crate::navigator::CliNavigator;
use anyhow::Result;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::debug;
use triqueta_api::TriquetaApi;
use triqueta_auth::AuthenticatedApiClient;
use triqueta_config_and_utils::{Config, Paths};
use triqueta_storage::{CredentialStore, FileStorage};

/// Build the API client for one invocation of `command`.
///
/// Credentials live in `~/.triqueta/credentials.json` so a session survives
/// between invocations.
pub fn connect(command: &str) -> Result<TriquetaApi> {
    let paths = Paths::new()?;
    paths.ensure_dirs()?;
    let config = Config::load(&paths)?;

    let storage = FileStorage::open(paths.credentials_file())?;
    let tokens = Arc::new(CredentialStore::new(Arc::new(storage)));
    let navigator = Arc::new(CliNavigator::new(command));

    debug!(api_url = %config.api_url, command, "connecting");
    let client = AuthenticatedApiClient::from_config(&config, tokens, navigator)?;
    Ok(TriquetaApi::new(client))
}

/// Read one trimmed line after printing `label`.
fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
