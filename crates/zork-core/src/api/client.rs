//! API client for communicating with the Zork REST API.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests for the user's profile and transaction history.

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{Transaction, UserProfile};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Profile endpoint, relative to the API base URL
const USER_PATH: &str = "/user";

/// Transaction history endpoint, relative to the API base URL
const TRANSACTIONS_PATH: &str = "/transactions";

/// Outcome of a profile fetch that the session bootstrap can act on.
///
/// Everything that is neither a profile nor a 403 is an `Err(ApiError)`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileFetch {
    Found(UserProfile),
    /// The server answered 403 for this credential
    Rejected,
}

impl ProfileFetch {
    /// Fold the 403 case of a raw API result into `Rejected`
    pub fn from_result(result: Result<UserProfile, ApiError>) -> Result<Self, ApiError> {
        match result {
            Ok(profile) => Ok(ProfileFetch::Found(profile)),
            Err(e) if e.is_access_denied() => Ok(ProfileFetch::Rejected),
            Err(e) => Err(e),
        }
    }
}

/// Where the session bootstrap gets profiles from
pub trait ProfileSource: Send + Sync {
    fn fetch_profile<'a>(&'a self, credential: &'a str)
        -> BoxFuture<'a, Result<ProfileFetch, ApiError>>;
}

/// API client for the Zork backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        credential: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        debug!(url = url, "GET");
        let response = self
            .client
            .get(url)
            .bearer_auth(credential)
            .query(query)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", url, e))
        })
    }

    // ===== Data Fetching Methods =====

    /// Fetch the profile of the user the credential belongs to
    pub async fn fetch_user(&self, credential: &str) -> Result<UserProfile, ApiError> {
        self.get(&self.url(USER_PATH), credential, &[]).await
    }

    /// Fetch the transactions involving `with_id` ("self" for the current user)
    pub async fn fetch_transactions(
        &self,
        credential: &str,
        with_id: &str,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.get(&self.url(TRANSACTIONS_PATH), credential, &[("withID", with_id)])
            .await
    }
}

impl ProfileSource for ApiClient {
    fn fetch_profile<'a>(
        &'a self,
        credential: &'a str,
    ) -> BoxFuture<'a, Result<ProfileFetch, ApiError>> {
        Box::pin(async move { ProfileFetch::from_result(self.fetch_user(credential).await) })
    }
}
