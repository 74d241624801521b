//! Request throttling for NCBI E-utilities
//!
//! NCBI asks clients without an API key to send no more than three requests
//! per second. The limiter counts requests inside a window that restarts
//! whenever more than one full window has passed since the previous request.
//! Once the budget is used up it sleeps for a whole window instead of the
//! exact remaining time, which only ever adds delay.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument};

/// Sliding-window request limiter shared by every query of a survey
#[derive(Clone, Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    state: Arc<Mutex<WindowState>>,
}

#[derive(Debug, Default)]
struct WindowState {
    last_request: Option<Instant>,
    requests_in_window: u32,
}

impl RateLimiter {
    /// Create a limiter allowing `max_requests` per `window`
    ///
    /// # Example
    ///
    /// ```
    /// use multiomics_survey::rate_limit::RateLimiter;
    /// use std::time::Duration;
    ///
    /// let limiter = RateLimiter::new(3, Duration::from_millis(1050));
    /// assert_eq!(limiter.max_requests(), 3);
    /// ```
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Arc::new(Mutex::new(WindowState::default())),
        }
    }

    /// Three requests per 1050 ms, slightly below NCBI's limit without an API key
    pub fn ncbi_default() -> Self {
        Self::new(3, Duration::from_millis(1050))
    }

    /// Block until another request fits into the current window
    ///
    /// Returns `true` when the call had to sleep.
    #[instrument(skip(self))]
    pub async fn wait_if_needed(&self) -> bool {
        let budget_exhausted = {
            let mut state = self.lock_state();
            let now = Instant::now();
            let window_elapsed = state
                .last_request
                .is_none_or(|last| now.duration_since(last) > self.window);

            if window_elapsed {
                state.requests_in_window = 0;
            }
            debug!(
                requests_in_window = state.requests_in_window,
                max_requests = self.max_requests,
                "Checked request budget"
            );
            state.requests_in_window >= self.max_requests
        };

        if budget_exhausted {
            info!(
                window_ms = self.window.as_millis() as u64,
                "Request budget exhausted, waiting one full window"
            );
            sleep(self.window).await;
            self.lock_state().requests_in_window = 0;
        }

        budget_exhausted
    }

    /// Note that a request has just been issued
    pub fn record_request(&self) {
        let mut state = self.lock_state();
        state.last_request = Some(Instant::now());
        state.requests_in_window += 1;
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Requests counted in the current window (for testing and monitoring)
    pub fn requests_in_window(&self) -> u32 {
        self.lock_state().requests_in_window
    }

    fn lock_state(&self) -> MutexGuard<'_, WindowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::ncbi_default()
    }
}
