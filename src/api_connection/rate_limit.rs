use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const MAX_REQUESTS_PER_WINDOW: usize = 10;
pub const WINDOW: Duration = Duration::from_secs(60);
pub const COOLDOWN: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitStats {
    pub requests_in_window: usize,
    pub max_requests: usize,
    pub window_secs: u64,
    pub can_make_request: bool,
}

/// Rolling-window limiter with a minimum gap between requests.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    cooldown: Duration,
    history: VecDeque<Instant>,
    last_request: Option<Instant>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(MAX_REQUESTS_PER_WINDOW, WINDOW, COOLDOWN)
    }
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration, cooldown: Duration) -> Self {
        Self {
            max_requests,
            window,
            cooldown,
            history: VecDeque::new(),
            last_request: None,
        }
    }

    fn prune(&mut self, now: Instant) {
        while let Some(oldest) = self.history.front() {
            if now.saturating_duration_since(*oldest) >= self.window {
                self.history.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn can_make_request(&mut self, now: Instant) -> bool {
        self.prune(now);
        if self.history.len() >= self.max_requests {
            return false;
        }
        match self.last_request {
            Some(last) => now.saturating_duration_since(last) >= self.cooldown,
            None => true,
        }
    }

    /// Records a request at `now`, or returns how many whole seconds to wait
    /// (at least one).
    pub fn try_acquire(&mut self, now: Instant) -> Result<(), u64> {
        if !self.can_make_request(now) {
            return Err(self.wait_secs(now));
        }
        self.history.push_back(now);
        self.last_request = Some(now);
        Ok(())
    }

    fn wait_secs(&self, now: Instant) -> u64 {
        let cooldown_left = self
            .last_request
            .map(|last| self.cooldown.saturating_sub(now.saturating_duration_since(last)))
            .unwrap_or_default();
        let window_left = if self.history.len() >= self.max_requests {
            self.history
                .front()
                .map(|oldest| self.window.saturating_sub(now.saturating_duration_since(*oldest)))
                .unwrap_or_default()
        } else {
            Duration::ZERO
        };
        let wait = cooldown_left.max(window_left);
        (wait.as_millis() as u64).div_ceil(1000).max(1)
    }

    pub fn stats(&mut self, now: Instant) -> RateLimitStats {
        RateLimitStats {
            can_make_request: self.can_make_request(now),
            requests_in_window: self.history.len(),
            max_requests: self.max_requests,
            window_secs: self.window.as_secs(),
        }
    }
}
