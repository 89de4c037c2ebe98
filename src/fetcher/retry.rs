use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, timeout, Instant};

use crate::app::{Result, YtsError};

/// Retry bounded by elapsed wall-clock time rather than attempt count.
///
/// Transient failures are retried with exponential backoff until the next
/// attempt would start past `budget`; every attempt is also cut off at the
/// remaining budget so a hung connection cannot outlive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub budget: Duration,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Catalog API and browse pages.
    pub const fn catalog() -> Self {
        Self {
            budget: Duration::from_secs(3),
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(800),
        }
    }

    /// Metadata pages and file downloads.
    pub const fn transfer() -> Self {
        Self {
            budget: Duration::from_secs(10),
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(5),
        }
    }

    pub fn with_budget(self, budget: Duration) -> Self {
        Self { budget, ..self }
    }

    pub async fn run<T, F, Fut>(&self, target: &str, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let mut backoff = self.initial_backoff;
        let mut attempts: u32 = 0;
        let mut last_error: Option<String> = None;

        loop {
            attempts += 1;
            let remaining = self.budget.saturating_sub(started.elapsed());

            let error = match timeout(remaining, attempt()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) if !e.is_transient() => return Err(e),
                Ok(Err(e)) => e.to_string(),
                Err(_) => {
                    let last = last_error.as_deref().unwrap_or("attempt did not finish in time");
                    return Err(self.timed_out(target, attempts, last));
                }
            };

            let remaining = self.budget.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                return Err(self.timed_out(target, attempts, &error));
            }

            // The final sleep is clipped so one more attempt starts at the deadline.
            let delay = backoff.min(remaining);
            tracing::warn!(
                "Attempt {} for {} failed ({}), retrying in {:?}",
                attempts,
                target,
                error,
                delay
            );
            last_error = Some(error);
            sleep(delay).await;
            backoff = (backoff * 2).min(self.max_backoff);
        }
    }

    fn timed_out(&self, target: &str, attempts: u32, last_error: &str) -> YtsError {
        YtsError::FetchTimeout {
            url: target.to_string(),
            budget: self.budget,
            attempts,
            last_error: last_error.to_string(),
        }
    }
}
