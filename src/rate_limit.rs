//! Fixed-window per-IP rate limiting.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Length of one rate-limit window.
const WINDOW: Duration = Duration::from_secs(60);

/// Map size past which stale windows are swept on the next check.
const SWEEP_THRESHOLD: usize = 1024;

struct Window {
    window_start: Instant,
    count: u32,
}

/// Per-IP request counter over a fixed 60-second window.
///
/// The window does not slide: the first request from an IP opens its
/// window, and the count resets only once the full window has elapsed.
pub struct RateLimiter {
    limit: u32,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `limit` requests per window per IP.
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Records a request from `ip` and reports whether it is allowed.
    pub async fn check(&self, ip: IpAddr) -> bool {
        self.check_at(ip, Instant::now()).await
    }

    async fn check_at(&self, ip: IpAddr, now: Instant) -> bool {
        let mut windows = self.windows.lock().await;

        if windows.len() > SWEEP_THRESHOLD {
            windows.retain(|_, w| now.duration_since(w.window_start) < WINDOW);
        }

        let window = windows.entry(ip).or_insert(Window {
            window_start: now,
            count: 0,
        });
        if now.duration_since(window.window_start) >= WINDOW {
            window.window_start = now;
            window.count = 0;
        }

        window.count += 1;
        window.count <= self.limit
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.windows.lock().await.len()
    }
}
