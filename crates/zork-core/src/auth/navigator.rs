use std::sync::{Mutex, PoisonError};

use tracing::info;

pub trait Navigator: Send + Sync {
    /// Go to `location`
    fn push(&self, location: &str);
}

/// Navigator that only remembers where it was sent
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, location: &str) {
        info!(location = location, "Navigating");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator() {
        let nav = RecordingNavigator::new();
        assert_eq!(nav.count(), 0);
        assert!(nav.last().is_none());

        nav.push("/login");
        nav.push("/");
        assert_eq!(nav.count(), 2);
        assert_eq!(nav.last().as_deref(), Some("/"));
        assert_eq!(nav.history(), vec!["/login".to_string(), "/".to_string()]);
    }
}
