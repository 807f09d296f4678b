//! Session navigation for a terminal client.
//!
//! There is no login screen to route to; the user is told to run
//! `triqueta login` instead.

use std::sync::atomic::{AtomicBool, Ordering};
use triqueta_auth::SessionNavigator;

pub const SESSION_EXPIRED_NOTICE: &str =
    "Your session has expired. Run 'triqueta login' to sign in again.";

/// Reports the running command as the current view.
#[derive(Debug)]
pub struct CliNavigator {
    view: String,
    notified: AtomicBool,
}

impl CliNavigator {
    /// `command` is the top-level subcommand name (`login`, `favorites`...).
    pub fn new(command: &str) -> Self {
        Self {
            view: format!("/{}", command),
            notified: AtomicBool::new(false),
        }
    }

    pub fn notified(&self) -> bool {
        self.notified.load(Ordering::SeqCst)
    }
}

impl SessionNavigator for CliNavigator {
    fn current_view(&self) -> Option<String> {
        Some(self.view.clone())
    }

    fn redirect_to_login(&self) {
        if !self.notified.swap(true, Ordering::SeqCst) {
            eprintln!("{}", SESSION_EXPIRED_NOTICE);
        }
    }
}
