use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Cookie path used for every session slot
pub const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieOptions {
    pub path: String,
    pub same_site: SameSite,
    /// Seconds until expiry. `Some(0)` is a session cookie, `None` never expires.
    pub max_age: Option<i64>,
}

impl CookieOptions {
    /// Root-scoped, same-site, expires with the session
    pub fn session() -> Self {
        Self {
            path: ROOT_PATH.to_string(),
            same_site: SameSite::Strict,
            max_age: Some(0),
        }
    }

    /// Root-scoped, same-site, no expiry
    pub fn persistent() -> Self {
        Self {
            path: ROOT_PATH.to_string(),
            same_site: SameSite::Strict,
            max_age: None,
        }
    }

    pub fn is_session(&self) -> bool {
        self.max_age == Some(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    pub value: String,
    pub options: CookieOptions,
    pub set_at: DateTime<Utc>,
}

impl Cookie {
    pub fn new(value: &str, options: CookieOptions) -> Self {
        Self {
            value: value.to_string(),
            options,
            set_at: Utc::now(),
        }
    }

    /// Wall-clock expiry, if the cookie has one. Session cookies have none.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self.options.max_age {
            Some(secs) if secs > 0 => Some(self.set_at + Duration::seconds(secs)),
            _ => None,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at().map(|at| Utc::now() >= at).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_never_expires_by_clock() {
        let mut cookie = Cookie::new("v", CookieOptions::session());
        cookie.set_at = Utc::now() - Duration::days(365);
        assert!(cookie.options.is_session());
        assert!(cookie.expires_at().is_none());
        assert!(!cookie.is_expired());
    }

    #[test]
    fn test_max_age_expiry() {
        let options = CookieOptions {
            max_age: Some(60),
            ..CookieOptions::persistent()
        };
        let mut cookie = Cookie::new("v", options);
        assert!(!cookie.is_expired());

        cookie.set_at = Utc::now() - Duration::seconds(61);
        assert!(cookie.is_expired());
    }

    #[test]
    fn test_persistent_defaults() {
        let options = CookieOptions::persistent();
        assert_eq!(options.path, "/");
        assert_eq!(options.same_site, SameSite::Strict);
        assert!(!options.is_session());
    }
}
