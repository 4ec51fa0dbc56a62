//! Core library for the Zork dashboard.
//!
//! Resolves the signed-in user from a cookie-stored access token, talks to
//! the Zork REST API, and models profiles and transactions.

pub mod api;
pub mod auth;
pub mod config;
pub mod jar;
pub mod models;

pub use api::{ApiClient, ApiError, ProfileFetch, ProfileSource};
pub use auth::{Navigator, Policy, RecordingNavigator, SessionBootstrap, SessionSnapshot};
pub use config::Config;
pub use jar::{CookieJar, FileJar, MemoryJar, SessionStore};
pub use models::{Transaction, TransactionFilter, UserProfile};
