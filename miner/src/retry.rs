use std::{future::Future, time::Duration};

use kaleido_api::consts::{MAX_RETRIES, RETRY_BACKOFF_SECS};

use crate::{error::Error, transport::Response};

/// Bounded attempts with linear backoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            backoff_base: Duration::from_secs(RETRY_BACKOFF_SECS),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given failed attempt (1-indexed).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_base
            .checked_mul(attempt)
            .unwrap_or(Duration::MAX)
    }
}

/// Runs `request` until it yields a 200 or the policy runs out of attempts.
///
/// Non-200 responses and transport errors both count as failed attempts.
/// The error returned on exhaustion wraps the last failure.
pub async fn execute<F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut request: F,
) -> Result<Response, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Response, Error>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        let err = match request().await {
            Ok(resp) if resp.is_success() => return Ok(resp),
            Ok(resp) => Error::HttpStatus {
                status: resp.status,
                body: resp.body,
            },
            Err(err) => err,
        };
        if attempt >= max_attempts {
            return Err(Error::RetriesExhausted {
                operation: operation.to_string(),
                attempts: attempt,
                source: Box::new(err),
            });
        }
        log::warn!(
            "[{}] retrying ({}/{}): {}",
            operation,
            attempt,
            max_attempts,
            err
        );
        tokio::time::sleep(policy.backoff(attempt)).await;
    }
}
