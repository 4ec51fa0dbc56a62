//! Utility functions for terminal output formatting.

pub mod format;

pub use format::{format_date, format_zorks, truncate_string};
