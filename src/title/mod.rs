//! Page title handling for Philosophy Walk
//!
//! This module provides article title normalization (`PageId`) and the
//! disallowed-target rule set used to keep the walk inside article space.

mod normalize;
mod rules;

pub use normalize::{normalize_title, PageId};
pub use rules::{DisallowedTargets, TargetRule, NON_ARTICLE_NAMESPACES};

/// Title of the page every walk hopes to reach
pub const PHILOSOPHY: &str = "Philosophy";
