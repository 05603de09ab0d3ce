//! One-shot question loading with bounded retry.

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::RetryPolicy;
use crate::error::SourceError;

use super::model::QuestionSet;
use super::source::QuestionSource;

/// Fetch the question list, retrying transient failures with exponential
/// backoff and jitter.
///
/// Non-retryable errors (malformed or invalid data, missing files, 4xx)
/// return immediately. When every attempt fails the last error is returned.
pub async fn load_with_retry(
    source: &dyn QuestionSource,
    policy: &RetryPolicy,
) -> Result<QuestionSet, SourceError> {
    let mut attempt = 0;
    loop {
        match source.fetch().await {
            Ok(questions) => {
                info!(
                    location = source.location(),
                    questions = questions.len(),
                    attempts = attempt + 1,
                    "Question list loaded"
                );
                return Ok(questions);
            }
            Err(e) if !e.is_retryable() => {
                warn!(location = source.location(), error = %e, "Question load failed, not retrying");
                return Err(e);
            }
            Err(e) if attempt >= policy.max_retries => {
                warn!(
                    location = source.location(),
                    attempts = attempt + 1,
                    error = %e,
                    "Question load failed, retries exhausted"
                );
                return Err(e);
            }
            Err(e) => {
                let delay = policy.delay_for(attempt);
                warn!(
                    location = source.location(),
                    attempt = attempt + 1,
                    max_attempts = policy.max_retries + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Question load failed, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
