//! Cookie jar holding the session's named slots.
//!
//! This module provides:
//! - `CookieJar`: the get/set/remove seam the session bootstrap depends on
//! - `MemoryJar`: an in-process jar
//! - `FileJar`: a jar whose persistent cookies survive restarts on disk
//! - `SessionStore`: typed access to the `access_token` and `user` slots
//!
//! Session cookies (max-age zero) are never written to disk and end with the process.

pub mod cookie;
pub mod file;
pub mod memory;
pub mod store;

use anyhow::Result;
use tokio::sync::watch;

pub use cookie::{Cookie, CookieOptions, SameSite};
pub use file::FileJar;
pub use memory::MemoryJar;
pub use store::SessionStore;

/// Slot holding the bearer credential
pub const ACCESS_TOKEN: &str = "access_token";

/// Slot holding the serialized `UserProfile`
pub const USER: &str = "user";

pub trait CookieJar: Send + Sync {
    /// Current value of a cookie, or None if it is absent or expired
    fn get(&self, name: &str) -> Option<String>;

    /// Replace a cookie. The write is all-or-nothing.
    fn set(&self, name: &str, value: &str, options: CookieOptions) -> Result<()>;

    /// Remove a cookie. Removing an absent cookie is a no-op.
    fn remove(&self, name: &str) -> Result<()>;

    /// Revision counter, bumped whenever a cookie's visible value changes
    fn subscribe(&self) -> watch::Receiver<u64>;

    fn revision(&self) -> u64;
}
