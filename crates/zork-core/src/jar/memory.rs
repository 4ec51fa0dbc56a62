use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use tokio::sync::watch;

use super::{Cookie, CookieJar, CookieOptions};

/// In-process cookie jar. Nothing outlives the value.
pub struct MemoryJar {
    cookies: Mutex<HashMap<String, Cookie>>,
    revision: watch::Sender<u64>,
}

impl Default for MemoryJar {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryJar {
    pub fn new() -> Self {
        Self::with_cookies(HashMap::new())
    }

    pub fn with_cookies(cookies: HashMap<String, Cookie>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            cookies: Mutex::new(cookies),
            revision,
        }
    }

    /// Cookies that should survive the session: not session-scoped and not expired
    pub(crate) fn persistent_cookies(&self) -> HashMap<String, Cookie> {
        let cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        cookies
            .iter()
            .filter(|(_, c)| !c.options.is_session() && !c.is_expired())
            .map(|(name, c)| (name.clone(), c.clone()))
            .collect()
    }

    fn bump(&self) {
        self.revision.send_modify(|r| *r += 1);
    }
}

impl CookieJar for MemoryJar {
    fn get(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        cookies
            .get(name)
            .filter(|c| !c.is_expired())
            .map(|c| c.value.clone())
    }

    fn set(&self, name: &str, value: &str, options: CookieOptions) -> Result<()> {
        let changed = {
            let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
            let previous = cookies
                .insert(name.to_string(), Cookie::new(value, options))
                .filter(|c| !c.is_expired());
            previous.map(|c| c.value != value).unwrap_or(true)
        };
        if changed {
            self.bump();
        }
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let changed = {
            let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
            cookies.remove(name).map(|c| !c.is_expired()).unwrap_or(false)
        };
        if changed {
            self.bump();
        }
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn revision(&self) -> u64 {
        *self.revision.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let jar = MemoryJar::new();
        assert!(jar.get("a").is_none());

        jar.set("a", "1", CookieOptions::session()).unwrap();
        assert_eq!(jar.get("a").as_deref(), Some("1"));

        jar.remove("a").unwrap();
        assert!(jar.get("a").is_none());
    }

    #[test]
    fn test_revision_only_moves_on_change() {
        let jar = MemoryJar::new();
        assert_eq!(jar.revision(), 0);

        jar.set("a", "1", CookieOptions::session()).unwrap();
        assert_eq!(jar.revision(), 1);

        // Same value again
        jar.set("a", "1", CookieOptions::session()).unwrap();
        assert_eq!(jar.revision(), 1);

        jar.remove("a").unwrap();
        assert_eq!(jar.revision(), 2);

        // Already absent
        jar.remove("a").unwrap();
        assert_eq!(jar.revision(), 2);
    }

    #[test]
    fn test_expired_cookie_is_absent() {
        let options = CookieOptions {
            max_age: Some(10),
            ..CookieOptions::persistent()
        };
        let mut stale = Cookie::new("old", options);
        stale.set_at = chrono::Utc::now() - chrono::Duration::seconds(11);
        let jar = MemoryJar::with_cookies(HashMap::from([("b".to_string(), stale)]));
        assert!(jar.get("b").is_none());
    }

    #[test]
    fn test_persistent_cookies_skip_session() {
        let jar = MemoryJar::new();
        jar.set("token", "t", CookieOptions::persistent()).unwrap();
        jar.set("user", "{}", CookieOptions::session()).unwrap();

        let kept = jar.persistent_cookies();
        assert!(kept.contains_key("token"));
        assert!(!kept.contains_key("user"));
    }

    #[tokio::test]
    async fn test_subscriber_sees_change() {
        let jar = MemoryJar::new();
        let mut rx = jar.subscribe();
        jar.set("a", "1", CookieOptions::session()).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1);
    }
}
