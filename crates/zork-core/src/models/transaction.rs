use serde::{Deserialize, Serialize};

/// A zork transfer between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Transaction {
    pub id: i64,
    pub from_id: i64,
    pub to_id: i64,
    pub amount: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Which side of a transaction a user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
    Unrelated,
}

impl Transaction {
    pub fn direction_for(&self, user_id: i64) -> Direction {
        if self.from_id == user_id {
            Direction::Sent
        } else if self.to_id == user_id {
            Direction::Received
        } else {
            Direction::Unrelated
        }
    }
}

/// Sent/received toggles for the transaction history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionFilter {
    pub sent: bool,
    pub received: bool,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            sent: true,
            received: true,
        }
    }
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction, user_id: i64) -> bool {
        (transaction.from_id == user_id && self.sent)
            || (transaction.to_id == user_id && self.received)
    }

    /// Keep the transactions the toggles allow, preserving order
    pub fn apply(&self, transactions: &[Transaction], user_id: i64) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t, user_id))
            .cloned()
            .collect()
    }
}
