//! Simulated backend round trips.
//!
//! There is no server yet, so each call just waits for the configured
//! latency. Setting the transport offline makes every call fail, and an
//! optional timeout turns slow calls into failures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{BackendCall, BackendTransport, TransportError};

/// Latency applied when none is configured.
pub const DEFAULT_LATENCY: Duration = Duration::from_secs(1);

/// Async sleep, swappable in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio timer-backed sleeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// [`BackendTransport`] that only waits.
#[derive(Clone)]
pub struct SimulatedTransport {
    latency: Duration,
    timeout: Option<Duration>,
    offline: bool,
    sleeper: Arc<dyn Sleeper>,
}

impl SimulatedTransport {
    /// Online transport with `latency` per call and no timeout.
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            timeout: None,
            offline: false,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Fail calls that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Make every call fail as unreachable.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Replace the sleeper.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl std::fmt::Debug for SimulatedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedTransport")
            .field("latency", &self.latency)
            .field("timeout", &self.timeout)
            .field("offline", &self.offline)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl BackendTransport for SimulatedTransport {
    async fn round_trip(&self, call: BackendCall) -> Result<(), TransportError> {
        debug!(call = call.as_str(), latency = ?self.latency, "backend round trip");

        let wait = self.sleeper.sleep(self.latency);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, wait).await.map_err(|_| {
                TransportError::timed_out(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX))
            })?,
            None => wait.await,
        }

        if self.offline {
            return Err(TransportError::unreachable(format!(
                "{} endpoint is offline",
                call.as_str()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, PoisonError};

    use super::*;
    use rstest::rstest;

    #[derive(Default)]
    struct RecordingSleeper(Mutex<Vec<Duration>>);

    impl RecordingSleeper {
        fn recorded(&self) -> Vec<Duration> {
            self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(duration);
        }
    }

    #[rstest]
    #[case(BackendCall::SendCode)]
    #[case(BackendCall::VerifyCode)]
    #[case(BackendCall::Signup)]
    #[tokio::test]
    async fn waits_for_configured_latency(#[case] call: BackendCall) {
        let sleeper = Arc::new(RecordingSleeper::default());
        let transport = SimulatedTransport::new(Duration::from_millis(250))
            .with_sleeper(Arc::clone(&sleeper) as Arc<dyn Sleeper>);

        transport.round_trip(call).await.expect("round trip succeeds");

        assert_eq!(sleeper.recorded(), [Duration::from_millis(250)]);
    }

    #[rstest]
    fn default_latency_is_one_second() {
        assert_eq!(SimulatedTransport::default().latency, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn offline_transport_is_unreachable() {
        let transport = SimulatedTransport::new(Duration::ZERO).with_offline(true);

        let err = transport
            .round_trip(BackendCall::Signup)
            .await
            .expect_err("offline");

        assert_eq!(err, TransportError::unreachable("signup endpoint is offline"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_round_trip_times_out() {
        let transport = SimulatedTransport::new(Duration::from_secs(5))
            .with_timeout(Some(Duration::from_millis(300)));

        let err = transport
            .round_trip(BackendCall::VerifyCode)
            .await
            .expect_err("times out");

        assert_eq!(err, TransportError::timed_out(300_u64));
    }

    #[tokio::test(start_paused = true)]
    async fn round_trip_within_timeout_succeeds() {
        let transport = SimulatedTransport::new(Duration::from_millis(100))
            .with_timeout(Some(Duration::from_secs(2)));

        let started = tokio::time::Instant::now();
        transport
            .round_trip(BackendCall::SendCode)
            .await
            .expect("round trip succeeds");

        assert!(started.elapsed() >= Duration::from_millis(100));
    }
}
