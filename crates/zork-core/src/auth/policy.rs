/// Location unauthenticated callers are sent to by default
pub const LOGIN_PATH: &str = "/login";

/// Redirect policy for a session bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Where to navigate. None never navigates.
    pub redirect_to: Option<String>,
    /// Navigate when a user *is* found instead of when one is missing
    pub redirect_if_found: bool,
}

impl Default for Policy {
    /// Send callers without a valid session to the login page
    fn default() -> Self {
        Self::redirect_if_missing(LOGIN_PATH)
    }
}

impl Policy {
    /// Never navigate
    pub fn none() -> Self {
        Self {
            redirect_to: None,
            redirect_if_found: false,
        }
    }

    pub fn redirect_if_missing(target: &str) -> Self {
        Self {
            redirect_to: Some(target.to_string()),
            redirect_if_found: false,
        }
    }

    /// Used by pages like login that should move on once a user exists
    pub fn redirect_if_found(target: &str) -> Self {
        Self {
            redirect_to: Some(target.to_string()),
            redirect_if_found: true,
        }
    }

    /// Target to navigate to when the session turns out to be missing
    pub(crate) fn on_missing(&self) -> Option<&str> {
        if self.redirect_if_found {
            None
        } else {
            self.redirect_to.as_deref()
        }
    }

    /// Target to navigate to when a user was found
    pub(crate) fn on_found(&self) -> Option<&str> {
        if self.redirect_if_found {
            self.redirect_to.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_redirects_to_login_when_missing() {
        let policy = Policy::default();
        assert_eq!(policy.on_missing(), Some("/login"));
        assert_eq!(policy.on_found(), None);
    }

    #[test]
    fn test_redirect_if_found() {
        let policy = Policy::redirect_if_found("/");
        assert_eq!(policy.on_missing(), None);
        assert_eq!(policy.on_found(), Some("/"));
    }

    #[test]
    fn test_none_never_redirects() {
        let policy = Policy::none();
        assert_eq!(policy.on_missing(), None);
        assert_eq!(policy.on_found(), None);

        let found_without_target = Policy {
            redirect_to: None,
            redirect_if_found: true,
        };
        assert_eq!(found_without_target.on_found(), None);
    }
}
