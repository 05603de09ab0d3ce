//! Configuration types.

use std::time::Duration;

use rand::Rng;

/// Where the bundled question list lives relative to the working directory.
pub const DEFAULT_QUESTIONS_SOURCE: &str = "data/questions.json";

/// Quiz configuration.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// File path or http(s) URL of the question list.
    pub questions_source: String,
    /// Retry policy for the one-shot question fetch.
    pub retry: RetryPolicy,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_source: DEFAULT_QUESTIONS_SOURCE.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl QuizConfig {
    /// Read configuration from `QUIZ_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let questions_source = lookup("QUIZ_QUESTIONS_SOURCE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.questions_source);

        let max_retries: u32 = lookup("QUIZ_FETCH_RETRIES")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.retry.max_retries);

        let base_delay = lookup("QUIZ_FETCH_BACKOFF_MS")
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry.base_delay);

        Self {
            questions_source,
            retry: RetryPolicy {
                max_retries,
                base_delay,
            },
        }
    }
}

/// Bounded exponential backoff for the question fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (0-based): `base * 2^attempt`
    /// plus up to half of that again as jitter.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let backoff = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
        let max_jitter_ms = (backoff.as_millis() / 2) as u64;
        let jitter_ms = if max_jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=max_jitter_ms)
        };
        backoff + Duration::from_millis(jitter_ms)
    }
}
