use std::time::Duration;

use rand::Rng;
use serde_json::Value;

use crate::{
    error::{FitRoomError, Result},
    gemini::GenerateTransport,
    models::provider_error_message,
};

/// Exponential backoff with jitter, applied to 429 responses only.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_jitter: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    /// `base_delay * 2^attempt`, attempt counted from zero.
    pub fn min_delay(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    pub fn delay(&self, attempt: u32) -> Duration {
        let jitter_ms = self.max_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::thread_rng().gen_range(0..jitter_ms))
        };
        self.min_delay(attempt) + jitter
    }
}

/// Sends `payload` until it succeeds, fails hard, or runs out of attempts.
///
/// Returns the JSON body of the first 2xx response.
pub async fn send_with_retry(
    transport: &dyn GenerateTransport,
    payload: &Value,
    policy: &RetryPolicy,
) -> Result<Value> {
    let mut failures = Vec::new();

    for attempt in 0..policy.max_attempts {
        let response = transport.send(payload).await?;

        if response.is_success() {
            if attempt > 0 {
                log::info!("{} succeeded on attempt {}", transport.name(), attempt + 1);
            }
            return Ok(response.body);
        }

        if !response.is_rate_limited() {
            let message = provider_error_message(&response.body)
                .unwrap_or_else(|| format!("API error: {}", response.status));
            log::warn!("{} answered {}: {}", transport.name(), response.status, message);
            return Err(FitRoomError::Api {
                status: response.status,
                message,
            });
        }

        let err = FitRoomError::RateLimited {
            attempt: attempt + 1,
        };
        failures.push(format!("attempt {}: rate limited (429)", attempt + 1));

        if attempt + 1 < policy.max_attempts {
            let delay = policy.delay(attempt);
            log::warn!(
                "{}; retrying in {}ms ({}/{})",
                err,
                delay.as_millis(),
                attempt + 1,
                policy.max_attempts
            );
            tokio::time::sleep(delay).await;
        } else {
            log::error!("{}; giving up", err);
        }
    }

    Err(FitRoomError::RetriesExhausted {
        attempts: policy.max_attempts,
        errors: failures,
    })
}
