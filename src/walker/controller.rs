//! Traversal controller - the first-link walk loop
//!
//! Each iteration checks, in this order:
//! 1. Current page is the target → `ReachedTarget`
//! 2. Hop budget used up → `BudgetExceeded`
//! 3. Fetch the current page (errors stop the walk with the path so far)
//! 4. No eligible link → `NoEligibleLink`
//! 5. Selected page already visited → `CycleDetected`
//! 6. Otherwise hop to the selected page and wait
//!
//! The budget check precedes every fetch, so a walk makes at most `budget`
//! fetch calls.

use crate::select::{LinkSelector, Selection};
use crate::title::PageId;
use crate::walker::{NoDelay, Outcome, PageFetcher, Reporter, Trail, TracingReporter, Wait};
use crate::FetchError;
use std::sync::Arc;
use thiserror::Error;

/// A walk stopped by a fetch error, with the progress made before it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Walk stopped at {page} after {} hops: {source}", .path.len().saturating_sub(1))]
pub struct WalkFailure {
    /// Page whose fetch failed
    pub page: PageId,
    /// Path walked up to and including `page`
    pub path: Vec<PageId>,
    pub source: FetchError,
}

/// Drives repeated fetch → select cycles to an [`Outcome`]
///
/// A `Walker` holds no per-walk state: every call to [`run`](Self::run)
/// owns a fresh [`Trail`], so one walker can serve many walks, in sequence
/// or concurrently.
pub struct Walker<F, W = NoDelay, R = TracingReporter> {
    fetcher: F,
    selector: LinkSelector,
    wait: W,
    reporter: R,
    target: PageId,
    budget: u32,
}

impl<F: PageFetcher> Walker<F> {
    /// Creates a walker that does not pause between hops and logs progress
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of page content
    /// * `selector` - First-eligible-link rule
    /// * `target` - Page that ends the walk successfully
    /// * `budget` - Maximum number of hops
    pub fn new(fetcher: F, selector: LinkSelector, target: PageId, budget: u32) -> Self {
        Self {
            fetcher,
            selector,
            wait: NoDelay,
            reporter: TracingReporter,
            target,
            budget,
        }
    }
}

impl<F, W, R> Walker<F, W, R>
where
    F: PageFetcher,
    W: Wait,
    R: Reporter,
{
    /// Replaces the inter-hop wait policy
    pub fn with_wait<W2: Wait>(self, wait: W2) -> Walker<F, W2, R> {
        Walker {
            fetcher: self.fetcher,
            selector: self.selector,
            wait,
            reporter: self.reporter,
            target: self.target,
            budget: self.budget,
        }
    }

    /// Replaces the progress reporter
    pub fn with_reporter<R2: Reporter>(self, reporter: R2) -> Walker<F, W, R2> {
        Walker {
            fetcher: self.fetcher,
            selector: self.selector,
            wait: self.wait,
            reporter,
            target: self.target,
            budget: self.budget,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn target(&self) -> &PageId {
        &self.target
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Walks from `start` until a terminal condition or a fetch error
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome)` - The walk reached one of its four terminal states
    /// * `Err(WalkFailure)` - A fetch failed; the failure carries the path so far
    pub async fn run(&self, start: PageId) -> Result<Outcome, WalkFailure> {
        tracing::debug!(
            "Walking from {} towards {} (budget {} hops)",
            start,
            self.target,
            self.budget
        );

        self.reporter.hop(&start, 0);
        let result = self.walk(Trail::new(start)).await;

        match &result {
            Ok(outcome) => self.reporter.finish(outcome),
            Err(failure) => self.reporter.failed(failure),
        }

        result
    }

    async fn walk(&self, mut trail: Trail) -> Result<Outcome, WalkFailure> {
        loop {
            let current = trail.current().clone();

            if current == self.target {
                return Ok(Outcome::ReachedTarget {
                    path: trail.into_path(),
                });
            }

            if trail.step() >= self.budget {
                return Ok(Outcome::BudgetExceeded {
                    path: trail.into_path(),
                });
            }

            let content = match self.fetcher.fetch(&current).await {
                Ok(content) => content,
                Err(source) => {
                    return Err(WalkFailure {
                        page: current,
                        path: trail.into_path(),
                        source,
                    })
                }
            };

            let current = match content.title() {
                Some(served) if *served != current => {
                    tracing::debug!("{} is served as {}", current, served);

                    if !trail.rename_current(served.clone()) {
                        return Ok(Outcome::CycleDetected {
                            path: trail.into_path(),
                            cycle_start: served.clone(),
                        });
                    }
                    if *served == self.target {
                        return Ok(Outcome::ReachedTarget {
                            path: trail.into_path(),
                        });
                    }
                    served.clone()
                }
                _ => current,
            };

            let next = match self.selector.select(&content, &current) {
                Selection::Next(next) => next,
                Selection::NoEligibleLink => {
                    return Ok(Outcome::NoEligibleLink {
                        path: trail.into_path(),
                        last_page: current,
                    })
                }
            };

            tracing::debug!("{} -> {}", current, next);

            if trail.contains(&next) {
                return Ok(Outcome::CycleDetected {
                    path: trail.into_path(),
                    cycle_start: next,
                });
            }

            trail.advance(next);
            self.reporter.hop(trail.current(), trail.step());
            self.wait.wait().await;
        }
    }
}

impl<F, W, R> Walker<F, W, R>
where
    F: PageFetcher + 'static,
    W: Wait + 'static,
    R: Reporter + 'static,
{
    /// Runs one independent walk per start page
    ///
    /// With `parallel` set every walk is its own tokio task; otherwise they
    /// run one after another. Results come back in the order of `starts`
    /// either way.
    pub async fn run_all(
        self: Arc<Self>,
        starts: Vec<PageId>,
        parallel: bool,
    ) -> Vec<(PageId, Result<Outcome, WalkFailure>)> {
        let mut results = Vec::with_capacity(starts.len());

        if !parallel {
            for start in starts {
                let result = self.run(start.clone()).await;
                results.push((start, result));
            }
            return results;
        }

        let handles: Vec<_> = starts
            .into_iter()
            .map(|start| {
                let walker = Arc::clone(&self);
                let handle = tokio::spawn({
                    let start = start.clone();
                    async move { walker.run(start).await }
                });
                (start, handle)
            })
            .collect();

        for (start, handle) in handles {
            match handle.await {
                Ok(result) => results.push((start, result)),
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => tracing::error!("Walk from {} was cancelled: {}", start, e),
            }
        }

        results
    }
}
