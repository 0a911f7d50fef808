//! MovementHistory - bounded energy history with ring-buffer eviction

use std::collections::VecDeque;

/// Fixed-capacity ordered energy samples; the oldest sample is evicted first
#[derive(Debug, Clone)]
pub struct MovementHistory {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl MovementHistory {
    pub const DEFAULT_CAPACITY: usize = 30;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, energy: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(energy);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Mean of the newest `window` samples, `None` until that many exist
    pub fn recent_mean(&self, window: usize) -> Option<f32> {
        if window == 0 || self.samples.len() < window {
            return None;
        }
        let sum: f32 = self.samples.iter().rev().take(window).sum();
        Some(sum / window as f32)
    }

    /// Mean over every retained sample, 0 when empty
    pub fn mean(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for MovementHistory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
