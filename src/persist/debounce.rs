// ==========================================
// stockbook - write debouncing
// ==========================================
// Collections are written at most once per debounce window. The
// state machine is polled with an explicit `now` so it is
// testable without sleeping: mark() arms a deadline per key,
// take_due() returns the keys whose deadline has passed, and
// drain_all() hands everything over regardless of deadlines for
// shutdown flushes.
// ==========================================

use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(1000);

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadlines: HashMap<&'static str, Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadlines: HashMap::new(),
        }
    }

    /// Arm (or re-arm) the deadline for a key. Repeated edits
    /// inside the window keep pushing the write out.
    pub fn mark(&mut self, key: &'static str, now: Instant) {
        self.deadlines.insert(key, now + self.window);
    }

    /// Keys whose window elapsed; they are removed from tracking.
    pub fn take_due(&mut self, now: Instant) -> Vec<&'static str> {
        let due: Vec<&'static str> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| *key)
            .collect();
        for key in &due {
            self.deadlines.remove(key);
        }
        due
    }

    /// Everything still pending, deadlines ignored. Used on
    /// shutdown so trailing edits are never lost.
    pub fn drain_all(&mut self) -> Vec<&'static str> {
        self.deadlines.drain().map(|(key, _)| key).collect()
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.deadlines.contains_key(key)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
