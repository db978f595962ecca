use crate::title::PageId;
use crate::walker::{Outcome, WalkFailure};

/// Receives progress notifications from a walk, for display only
///
/// The walker never reads anything back from a reporter.
pub trait Reporter: Send + Sync {
    /// Called for the start page (step 0) and after every hop
    fn hop(&self, page: &PageId, step: u32);

    /// Called once when the walk ends with an outcome
    fn finish(&self, outcome: &Outcome);

    /// Called once when the walk stops on a fetch error
    fn failed(&self, failure: &WalkFailure);
}

/// Logs walk progress through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn hop(&self, page: &PageId, step: u32) {
        tracing::info!("[{}] {}", step, page);
    }

    fn finish(&self, outcome: &Outcome) {
        match outcome {
            Outcome::ReachedTarget { .. } => tracing::info!("Walk {}", outcome),
            _ => tracing::warn!("Walk ended: {}", outcome),
        }
    }

    fn failed(&self, failure: &WalkFailure) {
        tracing::error!("{}", failure);
    }
}
