//! Session bootstrap for the dashboard.
//!
//! This module provides:
//! - `SessionBootstrap`: resolves the current user from the `access_token` cookie
//!   and decides whether the caller should be sent elsewhere
//! - `Policy`: where to redirect, and whether finding a user is the trigger
//! - `Navigator`: the "go to location" seam, with a recording implementation

pub mod bootstrap;
pub mod navigator;
pub mod policy;

pub use bootstrap::{SessionBootstrap, SessionSnapshot, SessionWatcher};
pub use navigator::{Navigator, RecordingNavigator};
pub use policy::Policy;
