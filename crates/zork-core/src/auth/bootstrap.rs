use std::ops::ControlFlow;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{ProfileFetch, ProfileSource};
use crate::jar::SessionStore;
use crate::models::UserProfile;

use super::{Navigator, Policy};

/// What the caller sees after an evaluation. Either half may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub credential: Option<String>,
    pub profile: Option<UserProfile>,
}

/// Resolves the current user from the cookie jar, fetching it when it is not cached.
pub struct SessionBootstrap {
    store: SessionStore,
    source: Arc<dyn ProfileSource>,
    navigator: Arc<dyn Navigator>,
    policy: Policy,
}

impl SessionBootstrap {
    pub fn new(
        store: SessionStore,
        source: Arc<dyn ProfileSource>,
        navigator: Arc<dyn Navigator>,
        policy: Policy,
    ) -> Self {
        Self {
            store,
            source,
            navigator,
            policy,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            credential: self.store.credential(),
            profile: self.store.profile(),
        }
    }

    /// Run one evaluation against the current jar contents.
    ///
    /// A 403 from the profile endpoint is handled here; every other fetch
    /// failure is returned to the caller untouched.
    pub async fn evaluate(&self) -> Result<SessionSnapshot> {
        let credential = self.store.credential();

        if credential.is_none() {
            if let Some(target) = self.policy.on_missing() {
                debug!(target = target, "No access token, redirecting");
                self.navigator.push(target);
                return Ok(self.snapshot());
            }
        }

        if self.store.profile().is_none() {
            self.fetch_profile(credential.as_deref().unwrap_or_default()).await?;
        } else {
            debug!("User profile already cached");
        }

        Ok(self.snapshot())
    }

    async fn fetch_profile(&self, credential: &str) -> Result<()> {
        let inputs = self.store.session_state();
        debug!("Fetching user profile");

        let outcome = self.source.fetch_profile(credential).await;

        if self.store.session_state() != inputs {
            warn!("Session changed during profile fetch, discarding response");
            return Ok(());
        }

        match outcome? {
            ProfileFetch::Found(profile) => {
                self.store.store_profile(&profile)?;
                info!(user_id = profile.id, "Cached user profile");
                if let Some(target) = self.policy.on_found() {
                    self.navigator.push(target);
                }
            }
            ProfileFetch::Rejected => {
                warn!("Access token rejected by profile endpoint");
                match self.policy.on_missing() {
                    Some(target) => self.navigator.push(target),
                    None => self.store.clear_profile()?,
                }
            }
        }
        Ok(())
    }

    /// Drop the cached profile so the next evaluation fetches it again
    pub fn reload_user(&self) -> Result<()> {
        debug!("Reloading user profile");
        self.store.clear_profile()
    }

    /// Forget both the credential and the cached profile
    pub fn logout(&self) -> Result<()> {
        info!("Logging out");
        self.store.clear_profile()?;
        self.store.clear_credential()
    }

    pub fn watch(&self) -> SessionWatcher {
        SessionWatcher::new(self.store.clone())
    }

    /// Evaluate, report, and wait for the credential or profile to change, until
    /// `on_snapshot` breaks, the jar goes away, or an evaluation fails.
    pub async fn run<F>(&self, mut on_snapshot: F) -> Result<()>
    where
        F: FnMut(&SessionSnapshot) -> ControlFlow<()>,
    {
        let mut watcher = self.watch();
        loop {
            let snapshot = self.evaluate().await?;
            if on_snapshot(&snapshot).is_break() {
                return Ok(());
            }
            if !watcher.changed().await {
                return Ok(());
            }
        }
    }
}

/// Waits for the (credential, user) pair in a jar to change.
pub struct SessionWatcher {
    store: SessionStore,
    rx: watch::Receiver<u64>,
    observed: (Option<String>, Option<String>),
}

impl SessionWatcher {
    pub fn new(store: SessionStore) -> Self {
        let rx = store.subscribe();
        let observed = store.session_state();
        Self { store, rx, observed }
    }

    /// Resolve once the pair differs from the last one seen. False if the jar closed.
    pub async fn changed(&mut self) -> bool {
        loop {
            if self.rx.changed().await.is_err() {
                return false;
            }
            let current = self.store.session_state();
            if current != self.observed {
                self.observed = current;
                return true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::future::BoxFuture;

    use crate::api::ApiError;
    use crate::auth::RecordingNavigator;
    use crate::jar::{CookieJar, CookieOptions, MemoryJar, ACCESS_TOKEN};

    /// Swaps the credential while the request is "in flight"
    struct RacingSource {
        store: SessionStore,
        calls: AtomicUsize,
    }

    impl ProfileSource for RacingSource {
        fn fetch_profile<'a>(
            &'a self,
            _credential: &'a str,
        ) -> BoxFuture<'a, Result<ProfileFetch, ApiError>> {
            Box::pin(async move {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    self.store.set_credential("newer").ok();
                }
                Ok(ProfileFetch::Found(UserProfile::new(1, "Stale", "s@zork.io", 0)))
            })
        }
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let store = SessionStore::new(Arc::new(MemoryJar::new()));
        store.set_credential("older").unwrap();
        let source = Arc::new(RacingSource {
            store: store.clone(),
            calls: AtomicUsize::new(0),
        });
        let nav = Arc::new(RecordingNavigator::new());
        let bootstrap = SessionBootstrap::new(
            store.clone(),
            source.clone(),
            nav.clone(),
            Policy::redirect_if_found("/"),
        );

        let snapshot = bootstrap.evaluate().await.unwrap();
        assert_eq!(snapshot.credential.as_deref(), Some("newer"));
        assert!(snapshot.profile.is_none());
        assert_eq!(nav.count(), 0);

        // The next evaluation fetches for the newer credential
        let snapshot = bootstrap.evaluate().await.unwrap();
        assert!(snapshot.profile.is_some());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(nav.last().as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_watcher_ignores_unrelated_and_unchanged_writes() {
        let jar = Arc::new(MemoryJar::new());
        let store = SessionStore::new(jar.clone());
        let mut watcher = SessionWatcher::new(store.clone());

        jar.set("theme", "dark", CookieOptions::persistent()).unwrap();
        jar.set(ACCESS_TOKEN, "tok", CookieOptions::persistent()).unwrap();

        assert!(watcher.changed().await);
        assert_eq!(watcher.observed.0.as_deref(), Some("tok"));
    }
}
