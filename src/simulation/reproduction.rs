use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Rolling statistics over captures, used to watch evasion improve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproductionStats {
    /// Lifespans of the most recently caught prey, oldest first.
    pub capture_lifespans: VecDeque<u64>,
    /// Longest lifespan any prey reached before being caught.
    pub longest_lifespan: u64,
    /// Maximum number of recent captures to track
    pub max_history: usize,
}

impl Default for ReproductionStats {
    fn default() -> Self {
        Self::new(100)
    }
}

impl ReproductionStats {
    /// Creates empty statistics keeping the last `max_history` captures.
    pub fn new(max_history: usize) -> Self {
        Self {
            capture_lifespans: VecDeque::with_capacity(max_history),
            longest_lifespan: 0,
            max_history,
        }
    }

    /// Record a capture and update statistics
    pub fn record_capture(&mut self, lifespan: u64) {
        self.longest_lifespan = self.longest_lifespan.max(lifespan);
        if self.max_history == 0 {
            return;
        }
        self.capture_lifespans.push_back(lifespan);
        if self.capture_lifespans.len() > self.max_history {
            self.capture_lifespans.pop_front();
        }
    }

    /// Average lifespan at capture over the tracked window
    pub fn avg_capture_lifespan(&self) -> f64 {
        if self.capture_lifespans.is_empty() {
            0.0
        } else {
            self.capture_lifespans.iter().sum::<u64>() as f64 / self.capture_lifespans.len() as f64
        }
    }

    /// Number of captures tracked
    pub fn capture_count(&self) -> usize {
        self.capture_lifespans.len()
    }
}
