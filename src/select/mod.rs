//! First-eligible-link selection
//!
//! A link is eligible when it is:
//! - not inside an italic span
//! - not inside a parenthetical span
//! - not matched by the disallowed-target rules
//! - not a link back to the page being viewed
//!
//! Selection is a pure function of its inputs: the same content and current
//! page always select the same link.

use crate::content::{ContentNode, PageContent};
use crate::title::{DisallowedTargets, PageId};

/// Result of selecting a link on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The first eligible link's target
    Next(PageId),
    /// No link on the page is eligible
    NoEligibleLink,
}

impl Selection {
    pub fn next(&self) -> Option<&PageId> {
        match self {
            Self::Next(page) => Some(page),
            Self::NoEligibleLink => None,
        }
    }
}

/// Picks the first eligible link of a page
#[derive(Debug, Clone, Default)]
pub struct LinkSelector {
    disallowed: DisallowedTargets,
}

impl LinkSelector {
    pub fn new(disallowed: DisallowedTargets) -> Self {
        Self { disallowed }
    }

    pub fn disallowed(&self) -> &DisallowedTargets {
        &self.disallowed
    }

    /// Returns the target of the first eligible link in document order
    ///
    /// # Example
    ///
    /// ```
    /// use philosophy_walk::content::{annotate, Markup};
    /// use philosophy_walk::select::{LinkSelector, Selection};
    /// use philosophy_walk::title::PageId;
    ///
    /// let page = |t: &str| PageId::parse(t).unwrap();
    /// let content = annotate(&[
    ///     Markup::ParenOpen,
    ///     Markup::link(page("D")),
    ///     Markup::ParenClose,
    /// ]);
    /// let selector = LinkSelector::default();
    /// assert_eq!(selector.select(&content, &page("A")), Selection::NoEligibleLink);
    /// ```
    pub fn select(&self, content: &PageContent, current: &PageId) -> Selection {
        content
            .nodes()
            .iter()
            .find(|node| self.is_eligible(node, current))
            .and_then(ContentNode::target)
            .cloned()
            .map_or(Selection::NoEligibleLink, Selection::Next)
    }

    /// Returns true if the node is a link the walk may follow from `current`
    pub fn is_eligible(&self, node: &ContentNode, current: &PageId) -> bool {
        match node {
            ContentNode::Link { target, flags, .. } => {
                flags.is_plain() && target != current && !self.disallowed.is_disallowed(target)
            }
            ContentNode::Text { .. } => false,
        }
    }
}
