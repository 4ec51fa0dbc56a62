use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile returned by `GET /user`.
///
/// Fields the dashboard does not read are kept in `extra` so the cached copy
/// serializes back to exactly what the API sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub email: String,
    /// Balance in zorks
    pub zorks: i64,
    #[serde(flatten)]
    #[cfg_attr(feature = "ts", ts(skip))]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn new(id: i64, first_name: &str, email: &str, zorks: i64) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            email: email.to_string(),
            zorks,
            extra: Map::new(),
        }
    }

    /// Name shown in greetings, falling back to the email when the first name is blank
    pub fn display_name(&self) -> &str {
        let name = self.first_name.trim();
        if name.is_empty() {
            &self.email
        } else {
            name
        }
    }
}
