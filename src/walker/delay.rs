//! Pauses between hops
//!
//! The walker calls [`Wait::wait`] once after every hop so a walk never
//! hammers the wiki. What the pause looks like is up to the policy.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// An inter-hop pause
#[async_trait]
pub trait Wait: Send + Sync {
    async fn wait(&self);
}

/// Does not pause at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Wait for NoDelay {
    async fn wait(&self) {}
}

/// Sleeps for a uniformly random duration within `[min, max]`
#[derive(Debug, Clone, Copy)]
pub struct JitteredDelay {
    min: Duration,
    max: Duration,
}

impl JitteredDelay {
    /// Creates a delay policy; the bounds are swapped if given in reverse
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// Draws the next pause length
    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let millis = rand::thread_rng().gen_range(self.min.as_millis()..=self.max.as_millis());
        Duration::from_millis(millis as u64)
    }
}

#[async_trait]
impl Wait for JitteredDelay {
    async fn wait(&self) {
        let delay = self.next_delay();
        tracing::trace!("Sleeping {}ms before next hop", delay.as_millis());
        tokio::time::sleep(delay).await;
    }
}
