use crate::title::PageId;
use std::collections::BTreeSet;

/// MediaWiki namespaces that never hold encyclopedia articles
pub const NON_ARTICLE_NAMESPACES: &[&str] = &[
    "Talk",
    "User",
    "User_talk",
    "Wikipedia",
    "Wikipedia_talk",
    "WP",
    "File",
    "File_talk",
    "Image",
    "MediaWiki",
    "MediaWiki_talk",
    "Template",
    "Template_talk",
    "Help",
    "Help_talk",
    "Category",
    "Category_talk",
    "Portal",
    "Portal_talk",
    "Draft",
    "Draft_talk",
    "TimedText",
    "TimedText_talk",
    "Module",
    "Module_talk",
    "Book",
    "Special",
    "Media",
];

/// A single pattern a link target is checked against
///
/// Patterns are stored in normalized form (underscores for spaces), so
/// `TargetRule::prefix("List of ")` matches `List_of_philosophers`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetRule {
    /// Title starts with the pattern (namespaces, e.g. `"File:"`)
    Prefix(String),
    /// Title ends with the pattern (e.g. `"/sandbox"`)
    Suffix(String),
    /// Title contains the pattern anywhere
    Contains(String),
    /// Title equals the pattern
    Exact(String),
}

impl TargetRule {
    pub fn prefix(pattern: &str) -> Self {
        Self::Prefix(normalize_pattern(pattern))
    }

    pub fn suffix(pattern: &str) -> Self {
        Self::Suffix(normalize_pattern(pattern))
    }

    pub fn contains(pattern: &str) -> Self {
        Self::Contains(normalize_pattern(pattern))
    }

    pub fn exact(pattern: &str) -> Self {
        Self::Exact(normalize_pattern(pattern))
    }

    /// Returns true if the page title matches this rule
    pub fn matches(&self, page: &PageId) -> bool {
        let title = page.as_str();
        match self {
            Self::Prefix(p) => title.starts_with(p.as_str()),
            Self::Suffix(p) => title.ends_with(p.as_str()),
            Self::Contains(p) => title.contains(p.as_str()),
            Self::Exact(p) => title == p,
        }
    }
}

fn normalize_pattern(pattern: &str) -> String {
    pattern.replace(' ', "_")
}

/// The set of link targets a walk must never follow
///
/// Membership is a plain scan over a set of patterns, so new rules are
/// added by inserting into the set rather than by new branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisallowedTargets {
    rules: BTreeSet<TargetRule>,
}

impl DisallowedTargets {
    /// Creates a rule set that allows every target
    pub fn empty() -> Self {
        Self {
            rules: BTreeSet::new(),
        }
    }

    /// Creates the rule set for Wikipedia article space
    ///
    /// Excludes every non-article namespace (`Special:`, `File:`, ...) and
    /// user sandboxes.
    ///
    /// # Examples
    ///
    /// ```
    /// use philosophy_walk::title::{DisallowedTargets, PageId};
    ///
    /// let rules = DisallowedTargets::wikipedia();
    /// assert!(rules.is_disallowed(&PageId::parse("Help:IPA/English").unwrap()));
    /// assert!(!rules.is_disallowed(&PageId::parse("Philosophy").unwrap()));
    /// ```
    pub fn wikipedia() -> Self {
        let mut rules = Self::empty();
        for namespace in NON_ARTICLE_NAMESPACES {
            rules.insert(TargetRule::Prefix(format!("{}:", namespace)));
        }
        rules.insert(TargetRule::suffix("/sandbox"));
        rules
    }

    /// Adds a rule, returning false if it was already present
    pub fn insert(&mut self, rule: TargetRule) -> bool {
        self.rules.insert(rule)
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with_rule(mut self, rule: TargetRule) -> Self {
        self.insert(rule);
        self
    }

    /// Returns true if any rule matches the page
    pub fn is_disallowed(&self, page: &PageId) -> bool {
        self.rules.iter().any(|rule| rule.matches(page))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetRule> {
        self.rules.iter()
    }
}

impl Default for DisallowedTargets {
    fn default() -> Self {
        Self::wikipedia()
    }
}

impl Extend<TargetRule> for DisallowedTargets {
    fn extend<I: IntoIterator<Item = TargetRule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}
