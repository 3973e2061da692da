use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

const MAX_ATTEMPTS: usize = 5;
const WINDOW: Duration = Duration::from_secs(900);

/// Per-IP failed-login limiter for the admin login form.
#[derive(Clone, Default)]
pub struct RateLimiter {
    attempts: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<IpAddr, Vec<Instant>>> {
        self.attempts.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// True once an address has spent its allowed failures within the
    /// current window. Stale attempts age out on each check.
    pub fn is_blocked(&self, ip: IpAddr) -> bool {
        let cutoff = Instant::now() - WINDOW;
        let mut map = self.entries();
        match map.get_mut(&ip) {
            Some(timestamps) => {
                timestamps.retain(|t| *t > cutoff);
                timestamps.len() >= MAX_ATTEMPTS
            }
            None => false,
        }
    }

    pub fn record_failure(&self, ip: IpAddr) {
        self.entries().entry(ip).or_default().push(Instant::now());
    }

    /// Forgets an address entirely, typically after a successful login.
    pub fn clear(&self, ip: IpAddr) {
        self.entries().remove(&ip);
    }
}
