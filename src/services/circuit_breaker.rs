//! Circuit breaker guarding calls to remote collaborators.
//!
//! After `failure_threshold` consecutive transport failures the breaker opens
//! and calls fail fast. Once `timeout` has elapsed a single trial call is let
//! through (half-open) and concurrent callers keep failing fast; the trial's
//! outcome closes or re-opens the circuit.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation, calls pass.
    Closed,
    /// Too many failures, calls are rejected until the timeout elapses.
    Open,
    /// Probing whether the remote side recovered.
    HalfOpen,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    name: &'static str,
    state: RwLock<CircuitState>,
    /// Consecutive failures.
    failure_count: AtomicU32,
    /// Last failure, or start of the outstanding half-open trial call.
    last_failure: Mutex<Option<Instant>>,
    /// Set while the half-open trial call is outstanding.
    trial_in_flight: AtomicBool,
    failure_threshold: u32,
    timeout: Duration,
}

impl CircuitBreaker {
    pub fn new(name: &'static str, failure_threshold: u32, timeout: Duration) -> Self {
        Self {
            name,
            state: RwLock::new(CircuitState::Closed),
            failure_count: AtomicU32::new(0),
            last_failure: Mutex::new(None),
            trial_in_flight: AtomicBool::new(false),
            failure_threshold: failure_threshold.max(1),
            timeout,
        }
    }

    /// Whether the next call may go out. While half-open only the trial call may.
    pub fn can_execute(&self) -> bool {
        match self.state() {
            CircuitState::Closed => true,
            CircuitState::HalfOpen => {
                if self.claim_trial() {
                    return true;
                }
                // A trial call whose outcome was never recorded (dropped request)
                // is given up after another timeout.
                if self.timeout_elapsed() {
                    warn!("{} circuit breaker trial call went unanswered, retrying", self.name);
                    self.mark_trial_start();
                    return true;
                }
                false
            }
            CircuitState::Open => {
                if !self.timeout_elapsed() {
                    return false;
                }
                {
                    let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
                    if *state == CircuitState::Open {
                        *state = CircuitState::HalfOpen;
                        info!("{} circuit breaker half-open, probing", self.name);
                    }
                }
                if self.claim_trial() {
                    self.mark_trial_start();
                    true
                } else {
                    false
                }
            }
        }
    }

    fn claim_trial(&self) -> bool {
        self.trial_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    fn mark_trial_start(&self) {
        *self.last_failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }

    fn timeout_elapsed(&self) -> bool {
        self.last_failure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .map_or(true, |at| at.elapsed() >= self.timeout)
    }

    pub fn record_success(&self) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if *state == CircuitState::HalfOpen {
            info!("{} circuit breaker recovered, closing", self.name);
        }
        *state = CircuitState::Closed;
        self.failure_count.store(0, Ordering::Relaxed);
        self.trial_in_flight.store(false, Ordering::SeqCst);
    }

    pub fn record_failure(&self) {
        let failures = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        *self.last_failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());

        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        match *state {
            CircuitState::Closed if failures >= self.failure_threshold => {
                *state = CircuitState::Open;
                error!(
                    "{} circuit breaker opened after {} failures (threshold {})",
                    self.name, failures, self.failure_threshold
                );
            }
            CircuitState::HalfOpen => {
                *state = CircuitState::Open;
                warn!("{} circuit breaker trial call failed, re-opening", self.name);
            }
            _ => {}
        }
        self.trial_in_flight.store(false, Ordering::SeqCst);
    }

    pub fn state(&self) -> CircuitState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }
}
