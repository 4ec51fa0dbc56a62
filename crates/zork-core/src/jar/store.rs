use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::warn;

use super::{CookieJar, CookieOptions, ACCESS_TOKEN, USER};
use crate::models::UserProfile;

/// Typed view over the two session slots of a cookie jar
#[derive(Clone)]
pub struct SessionStore {
    jar: Arc<dyn CookieJar>,
}

impl SessionStore {
    pub fn new(jar: Arc<dyn CookieJar>) -> Self {
        Self { jar }
    }

    pub fn credential(&self) -> Option<String> {
        self.jar.get(ACCESS_TOKEN).filter(|t| !t.is_empty())
    }

    pub fn set_credential(&self, token: &str) -> Result<()> {
        self.jar.set(ACCESS_TOKEN, token, CookieOptions::persistent())
    }

    pub fn clear_credential(&self) -> Result<()> {
        self.jar.remove(ACCESS_TOKEN)
    }

    /// Raw `user` slot contents, used to detect changes
    pub fn raw_profile(&self) -> Option<String> {
        self.jar.get(USER)
    }

    /// The (credential, raw user) pair a bootstrap evaluation depends on
    pub fn session_state(&self) -> (Option<String>, Option<String>) {
        (self.credential(), self.raw_profile())
    }

    /// Cached profile. An unreadable slot counts as absent so it gets re-fetched.
    pub fn profile(&self) -> Option<UserProfile> {
        let raw = self.raw_profile()?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable cached user profile");
                None
            }
        }
    }

    /// Serialize first, then write the slot in one step
    pub fn store_profile(&self, profile: &UserProfile) -> Result<()> {
        let value = serde_json::to_string(profile).context("Failed to serialize user profile")?;
        self.jar.set(USER, &value, CookieOptions::session())
    }

    pub fn clear_profile(&self) -> Result<()> {
        self.jar.remove(USER)
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.jar.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.jar.revision()
    }
}
