//! REST API client module for the Zork backend.
//!
//! This module provides the `ApiClient` for fetching the authenticated
//! user's profile and transaction history, and the `ProfileSource` seam
//! the session bootstrap fetches through.
//!
//! Requests authenticate with the `access_token` cookie as a bearer token.

pub mod client;
pub mod error;

pub use client::{ApiClient, ProfileFetch, ProfileSource};
pub use error::ApiError;
