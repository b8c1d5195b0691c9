use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::FormsConfig;

/// In-memory sliding-window limiter for form submissions, keyed by
/// "<form>:<client ip>".
pub struct RateLimiter {
    max_attempts: u64,
    window: Duration,
    entries: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_attempts: u64, window: Duration) -> Self {
        RateLimiter {
            max_attempts: max_attempts.max(1),
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(forms: &FormsConfig) -> Self {
        Self::new(forms.max_submissions, Duration::from_secs(forms.window_secs))
    }

    /// Record an attempt and return true if it is within the limit.
    pub fn check_and_record(&self, key: &str) -> bool {
        let mut map = match self.entries.lock() {
            Ok(m) => m,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = Instant::now();

        let attempts = map.entry(key.to_string()).or_default();
        attempts.retain(|t| now.duration_since(*t) < self.window);

        if (attempts.len() as u64) < self.max_attempts {
            attempts.push(now);
            true
        } else {
            false
        }
    }

    /// Drop keys with no attempts inside the window.
    pub fn cleanup(&self) {
        let mut map = match self.entries.lock() {
            Ok(m) => m,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = Instant::now();
        map.retain(|_, attempts| {
            attempts.retain(|t| now.duration_since(*t) < self.window);
            !attempts.is_empty()
        });
    }

    #[cfg(test)]
    pub fn tracked_keys(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }
}
