use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::{error, info, warn};

use super::{ReportSink, SinkError};
use crate::circuit_breaker::CircuitBreaker;
use crate::config::RecoveryConfig;
use crate::report::ReportRecord;

/// Wraps a sink with a per-attempt timeout, bounded retries on transient
/// failures and a circuit breaker.
pub struct ResilientSink<S> {
    inner: S,
    config: RecoveryConfig,
    breaker: CircuitBreaker,
}

impl<S: ReportSink> ResilientSink<S> {
    pub fn new(inner: S, config: RecoveryConfig) -> Self {
        let breaker = CircuitBreaker::new(&config);
        Self {
            inner,
            config,
            breaker,
        }
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    async fn attempt(&self, record: &ReportRecord) -> Result<(), SinkError> {
        let timeout = Duration::from_secs(self.config.operation_timeout_secs);
        match tokio::time::timeout(timeout, self.inner.append(record)).await {
            Ok(result) => result,
            Err(_) => Err(SinkError::Timeout(self.config.operation_timeout_secs)),
        }
    }
}

/// Exponential backoff capped at `max_retry_delay_ms`, plus up to 50% random jitter
pub fn retry_delay(config: &RecoveryConfig, attempt: u32) -> Duration {
    let exponential = config
        .base_retry_delay_ms
        .saturating_mul(1u64 << attempt.min(16));
    let capped = exponential.min(config.max_retry_delay_ms);
    let jitter = if capped >= 2 {
        rand::thread_rng().gen_range(0..=capped / 2)
    } else {
        0
    };
    Duration::from_millis(capped + jitter)
}

#[async_trait]
impl<S: ReportSink> ReportSink for ResilientSink<S> {
    async fn append(&self, record: &ReportRecord) -> Result<(), SinkError> {
        if self.breaker.is_open() {
            warn!(sink = self.inner.name(), "Circuit breaker open, skipping report sink call");
            return Err(SinkError::CircuitOpen);
        }

        let mut attempt = 0;
        loop {
            match self.attempt(record).await {
                Ok(()) => {
                    self.breaker.record_success();
                    if attempt > 0 {
                        info!(sink = self.inner.name(), retries = attempt, "Report stored after retrying");
                    }
                    return Ok(());
                }
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    let delay = retry_delay(&self.config, attempt);
                    warn!(
                        sink = self.inner.name(),
                        error = %e,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Report sink call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    self.breaker.record_failure();
                    error!(
                        sink = self.inner.name(),
                        error = %e,
                        attempts = attempt + 1,
                        "Report sink call failed"
                    );
                    return Err(e);
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_is_capped() {
        let config = RecoveryConfig {
            base_retry_delay_ms: 100,
            max_retry_delay_ms: 400,
            ..Default::default()
        };

        let first = retry_delay(&config, 0);
        assert!(first >= Duration::from_millis(100) && first <= Duration::from_millis(150));

        let late = retry_delay(&config, 10);
        assert!(late >= Duration::from_millis(400) && late <= Duration::from_millis(600));
    }

    #[test]
    fn test_retry_delay_without_base() {
        let config = RecoveryConfig {
            base_retry_delay_ms: 0,
            ..Default::default()
        };
        assert_eq!(retry_delay(&config, 3), Duration::ZERO);
    }
}
