//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as the search debounce window.

use std::time::Duration;

/// Default quiet period before a search request is sent.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Application behavior configuration.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// How long a search box waits for typing to settle.
    pub search_debounce: Duration,
    /// Queries shorter than this (after trimming) never reach the backend.
    pub min_query_chars: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_query_chars: 1,
        }
    }
}

impl BehaviorConfig {
    pub fn with_debounce_ms(mut self, millis: u64) -> Self {
        self.search_debounce = Duration::from_millis(millis);
        self
    }

    /// A blank query is never sent, so the minimum is at least one.
    pub fn with_min_query_chars(mut self, chars: usize) -> Self {
        self.min_query_chars = chars.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_query_chars_floor() {
        let config = BehaviorConfig::default()
            .with_debounce_ms(50)
            .with_min_query_chars(0);
        assert_eq!(config.min_query_chars, 1);
        assert_eq!(config.search_debounce, Duration::from_millis(50));
    }
}
