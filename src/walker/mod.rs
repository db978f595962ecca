//! Walker module: the first-link traversal and its collaborators
//!
//! This module contains:
//! - The collaborator seams (`PageFetcher`, `Wait`, `Reporter`)
//! - The HTTP fetcher backed by reqwest
//! - Inter-hop delay policies
//! - The traversal state (`Trail`) and its result (`Outcome`)
//! - The traversal controller (`Walker`)

mod controller;
mod delay;
mod fetcher;
mod outcome;
mod report;
mod trail;

pub use controller::{WalkFailure, Walker};
pub use delay::{JitteredDelay, NoDelay, Wait};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use outcome::{Outcome, EXIT_CONFIG_ERROR, EXIT_FETCH_ERROR};
pub use report::{Reporter, TracingReporter};
pub use trail::Trail;
