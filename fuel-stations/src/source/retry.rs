//! Bounded retry loop around a single document fetch.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::{error, info, warn};

use super::client::FetchConfig;
use super::error::FetchError;

/// One attempt at retrieving the raw feed document.
///
/// Any failure, including a body that does not parse as JSON, makes the
/// attempt eligible for a retry.
pub trait DocumentSource {
    fn fetch_once(&self) -> impl Future<Output = Result<Value, FetchError>>;
}

/// Retries a [`DocumentSource`] a fixed number of times with a fixed delay.
#[derive(Debug, Clone)]
pub struct Fetcher<S> {
    source: S,
    max_attempts: u32,
    retry_delay: Duration,
}

impl<S: DocumentSource> Fetcher<S> {
    /// Create a fetcher using the attempt count and delay from `config`.
    pub fn new(source: S, config: &FetchConfig) -> Self {
        Self {
            source,
            max_attempts: config.max_attempts.max(1),
            retry_delay: config.retry_delay,
        }
    }

    /// Fetch the document, returning on the first successful attempt.
    ///
    /// Sleeps for the retry delay after every failed attempt except the
    /// last. Returns [`FetchError::Exhausted`] carrying the final failure
    /// once all attempts are used up.
    pub async fn fetch(&self) -> Result<Value, FetchError> {
        let mut attempt = 1;
        loop {
            info!(attempt, max_attempts = self.max_attempts, "fetching price feed");

            let err = match self.source.fetch_once().await {
                Ok(document) => {
                    info!(attempt, "price feed downloaded");
                    return Ok(document);
                }
                Err(err) => err,
            };

            warn!(attempt, max_attempts = self.max_attempts, error = %err, "fetch attempt failed");

            if attempt >= self.max_attempts {
                error!(attempts = attempt, "all fetch attempts failed");
                return Err(FetchError::Exhausted {
                    attempts: attempt,
                    last: Box::new(err),
                });
            }

            info!(delay_secs = self.retry_delay.as_secs_f64(), "waiting before retry");
            tokio::time::sleep(self.retry_delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;
    use tokio::time::Instant;

    use super::*;

    const DELAY: Duration = Duration::from_secs(10);

    /// Fails a fixed number of times, then returns a fixed document.
    struct FlakySource {
        failures: u32,
        calls: RefCell<Vec<Instant>>,
    }

    impl FlakySource {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl DocumentSource for FlakySource {
        async fn fetch_once(&self) -> Result<Value, FetchError> {
            let mut calls = self.calls.borrow_mut();
            calls.push(Instant::now());
            if calls.len() as u32 <= self.failures {
                Err(FetchError::Api {
                    status: 503,
                    message: "Service Unavailable".into(),
                })
            } else {
                Ok(json!({"ListaEESSPrecio": [], "attempt": calls.len()}))
            }
        }
    }

    fn config(max_attempts: u32) -> FetchConfig {
        FetchConfig::default()
            .with_max_attempts(max_attempts)
            .with_retry_delay(DELAY)
    }

    #[tokio::test(start_paused = true)]
    async fn first_success_returns_immediately() {
        let fetcher = Fetcher::new(FlakySource::new(0), &config(5));
        let start = Instant::now();

        let doc = fetcher.fetch().await.unwrap();

        assert_eq!(doc["attempt"], 1);
        assert_eq!(fetcher.source.call_count(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_last_attempt_after_pauses() {
        let fetcher = Fetcher::new(FlakySource::new(4), &config(5));

        let doc = fetcher.fetch().await.unwrap();

        assert_eq!(doc["attempt"], 5);
        let calls = fetcher.source.calls.borrow();
        assert_eq!(calls.len(), 5);
        for pair in calls.windows(2) {
            assert!(pair[1] - pair[0] >= DELAY);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_attempts_exactly_max() {
        let fetcher = Fetcher::new(FlakySource::new(u32::MAX), &config(5));
        let start = Instant::now();

        let err = fetcher.fetch().await.unwrap_err();

        assert_eq!(fetcher.source.call_count(), 5);
        match err {
            FetchError::Exhausted { attempts, last } => {
                assert_eq!(attempts, 5);
                assert!(matches!(*last, FetchError::Api { status: 503, .. }));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
        // Four pauses, none after the final attempt.
        let elapsed = start.elapsed();
        assert!(elapsed >= DELAY * 4);
        assert!(elapsed < DELAY * 5);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_still_tries_once() {
        let fetcher = Fetcher::new(FlakySource::new(u32::MAX), &config(0));

        assert_eq!(fetcher.max_attempts, 1);
        assert!(fetcher.fetch().await.is_err());
        assert_eq!(fetcher.source.call_count(), 1);
    }
}
