//! Data models for Zork entities.
//!
//! - `UserProfile`: the authenticated user's summary and zork balance
//! - `Transaction`, `TransactionFilter`: transfer history and the sent/received toggles

pub mod transaction;
pub mod user;

pub use transaction::{Direction, Transaction, TransactionFilter};
pub use user::UserProfile;
