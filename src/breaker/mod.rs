//! Per-model circuit breaker.
//!
//! Three states. `Closed` admits everything and opens after a run of
//! failures; `Open` rejects until a cool-down has passed, then lets one
//! probe through as `HalfOpen`; `HalfOpen` closes again after enough
//! successes and re-opens on any failure. State is process-local and not
//! persisted.

use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitState::Closed => write!(f, "CLOSED"),
            CircuitState::Open => write!(f, "OPEN"),
            CircuitState::HalfOpen => write!(f, "HALF_OPEN"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BreakerConfig {
    /// Consecutive failures in `Closed` that open the circuit.
    pub failure_threshold: u32,
    /// Successes in `HalfOpen` that close it again.
    pub success_threshold: u32,
    /// Cool-down before an open circuit admits a probe.
    pub half_open_timeout: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            success_threshold: 2,
            half_open_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    failure_count: u32,
    success_count: u32,
    last_failure_at: Option<Instant>,
}

/// Breaker for one model id. All methods take `&self`; the O(1) state
/// sits behind a mutex so transitions are observed atomically.
pub struct CircuitBreaker {
    name: String,
    config: BreakerConfig,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: BreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failure_count: 0,
                success_count: 0,
                last_failure_at: None,
            }),
        }
    }

    fn transition(&self, inner: &mut BreakerInner, to: CircuitState) {
        if inner.state == to {
            return;
        }
        tracing::info!(
            "circuit breaker '{}' transitioned {} -> {}",
            self.name,
            inner.state,
            to
        );
        inner.state = to;
    }

    /// Whether a call to this model may go ahead. Crossing the cool-down
    /// moves an open circuit to half-open, and the admitted call is the
    /// probe.
    pub fn can_execute(&self) -> bool {
        let mut inner = self.inner.lock().expect("breaker lock");
        match inner.state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let cooled_down = inner
                    .last_failure_at
                    .is_some_and(|at| at.elapsed() >= self.config.half_open_timeout);
                if cooled_down {
                    self.transition(&mut inner, CircuitState::HalfOpen);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Record one successful outcome (one per retry set, not per attempt).
    pub fn record_success(&self) {
        let mut inner = self.inner.lock().expect("breaker lock");
        match inner.state {
            CircuitState::Closed => {
                inner.failure_count = 0;
            }
            CircuitState::HalfOpen => {
                inner.success_count += 1;
                if inner.success_count >= self.config.success_threshold {
                    self.transition(&mut inner, CircuitState::Closed);
                    inner.failure_count = 0;
                    inner.success_count = 0;
                }
            }
            CircuitState::Open => {}
        }
    }

    /// Record one failed outcome (one per retry set, not per attempt).
    pub fn record_failure(&self) {
        let mut inner = self.inner.lock().expect("breaker lock");
        match inner.state {
            CircuitState::Closed => {
                inner.failure_count += 1;
                inner.last_failure_at = Some(Instant::now());
                if inner.failure_count >= self.config.failure_threshold {
                    self.transition(&mut inner, CircuitState::Open);
                    inner.failure_count = 0;
                    inner.success_count = 0;
                }
            }
            CircuitState::HalfOpen => {
                self.transition(&mut inner, CircuitState::Open);
                inner.failure_count = 0;
                inner.success_count = 0;
                inner.last_failure_at = Some(Instant::now());
            }
            CircuitState::Open => {}
        }
    }

    pub fn state(&self) -> CircuitState {
        self.inner.lock().expect("breaker lock").state
    }

    #[cfg(test)]
    fn failure_count(&self) -> u32 {
        self.inner.lock().expect("breaker lock").failure_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_recovery() -> BreakerConfig {
        BreakerConfig {
            failure_threshold: 3,
            success_threshold: 2,
            half_open_timeout: Duration::ZERO,
        }
    }

    #[test]
    fn closed_allows_and_counts_failures() {
        let breaker = CircuitBreaker::new("m", BreakerConfig::default());
        assert!(breaker.can_execute());
        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 2);
        assert!(breaker.can_execute());
    }

    #[test]
    fn opens_after_threshold_and_blocks() {
        let breaker = CircuitBreaker::new("m", BreakerConfig::default());
        for _ in 0..3 {
            breaker.record_failure();
        }
        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(!breaker.can_execute());
        // Counters were reset by the transition.
        assert_eq!(breaker.failure_count(), 0);
    }

    #[test]
    fn success_in_closed_resets_the_failure_run() {
        let breaker = CircuitBreaker::new("m", BreakerConfig::default());
        breaker.record_failure();
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn cooled_down_circuit_admits_a_probe_as_half_open() {
        let breaker = CircuitBreaker::new("m", instant_recovery());
        for _ in 0..3 {
            breaker.record_failure();
        }
        assert_eq!(breaker.state(), CircuitState::Open);

        std::thread::sleep(Duration::from_millis(5));

        assert!(breaker.can_execute());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);
    }

    #[test]
    fn half_open_closes_after_enough_successes() {
        let breaker = CircuitBreaker::new("m", instant_recovery());
        for _ in 0..3 {
            breaker.record_failure();
        }
        std::thread::sleep(Duration::from_millis(5));
        assert!(breaker.can_execute());

        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::HalfOpen);
        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn half_open_failure_reopens_immediately() {
        let breaker = CircuitBreaker::new("m", instant_recovery());
        for _ in 0..3 {
            breaker.record_failure();
        }
        std::thread::sleep(Duration::from_millis(5));
        assert!(breaker.can_execute());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);

        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
    }

    #[test]
    fn open_circuit_blocks_during_cool_down() {
        let breaker = CircuitBreaker::new(
            "m",
            BreakerConfig {
                half_open_timeout: Duration::from_secs(60),
                ..BreakerConfig::default()
            },
        );
        for _ in 0..3 {
            breaker.record_failure();
        }
        assert!(!breaker.can_execute());
        assert!(!breaker.can_execute());
        assert_eq!(breaker.state(), CircuitState::Open);
    }
}
