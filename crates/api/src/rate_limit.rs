use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

#[derive(Debug)]
struct Window {
    hits: HashMap<String, VecDeque<Instant>>,
    last_sweep: Instant,
}

/// Sliding-window request counter keyed by client address.
///
/// Clients whose newest hit has left the window are dropped at most once per
/// window length, so the map only holds clients seen within roughly two windows.
#[derive(Debug, Clone)]
pub struct IpRateLimiter {
    inner: Arc<Mutex<Window>>,
    window: Duration,
    max_requests: usize,
}

impl IpRateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Window {
                hits: HashMap::new(),
                last_sweep: Instant::now(),
            })),
            window,
            max_requests,
        }
    }

    /// Records a hit for `client`, or returns how long until the oldest hit leaves the window.
    pub fn check(&self, client: &str) -> Result<(), Duration> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> Result<(), Duration> {
        let mut state = self.inner.lock();
        if now.saturating_duration_since(state.last_sweep) >= self.window {
            let window = self.window;
            state.hits.retain(|_, queue| {
                queue
                    .back()
                    .is_some_and(|newest| now.saturating_duration_since(*newest) < window)
            });
            state.last_sweep = now;
        }

        let queue = state.hits.entry(client.to_string()).or_default();
        while queue
            .front()
            .is_some_and(|oldest| now.saturating_duration_since(*oldest) >= self.window)
        {
            queue.pop_front();
        }

        if queue.len() >= self.max_requests {
            let retry_after = queue
                .front()
                .map(|oldest| {
                    self.window
                        .saturating_sub(now.saturating_duration_since(*oldest))
                })
                .unwrap_or(self.window);
            if queue.is_empty() {
                state.hits.remove(client);
            }
            return Err(retry_after);
        }

        queue.push_back(now);
        Ok(())
    }

    pub fn tracked_clients(&self) -> usize {
        self.inner.lock().hits.len()
    }
}
