//! Navigation port used when a session can no longer be recovered.

/// Lets the client send the user back to the login view.
pub trait SessionNavigator: Send + Sync {
    /// Route-like name of what the user is looking at, e.g. `/favoritos`.
    fn current_view(&self) -> Option<String>;

    /// Take the user to the login view.
    fn redirect_to_login(&self);
}

/// True for the login and registration views, where a redirect would only
/// interrupt the user.
pub fn is_auth_view(view: &str) -> bool {
    view.contains("/login") || view.contains("/register")
}

/// Navigator for headless use: nothing to redirect.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl SessionNavigator for NoopNavigator {
    fn current_view(&self) -> Option<String> {
        None
    }

    fn redirect_to_login(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_views() {
        assert!(is_auth_view("/login"));
        assert!(is_auth_view("/register?next=/favoritos"));
        assert!(!is_auth_view("/favoritos"));
        assert!(!is_auth_view("/"));
    }
}
