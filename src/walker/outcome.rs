use crate::title::PageId;
use std::fmt;

/// Exit status for an unrecoverable fetch error
pub const EXIT_FETCH_ERROR: u8 = 5;

/// Exit status for bad configuration or arguments
pub const EXIT_CONFIG_ERROR: u8 = 1;

/// How a walk ended
///
/// None of these are errors; they are the four expected results of a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The walk arrived at the target page
    ReachedTarget { path: Vec<PageId> },

    /// The next page was already on the path; it is not appended again
    CycleDetected { path: Vec<PageId>, cycle_start: PageId },

    /// `last_page` had no eligible link
    NoEligibleLink { path: Vec<PageId>, last_page: PageId },

    /// The hop budget ran out
    BudgetExceeded { path: Vec<PageId> },
}

impl Outcome {
    pub fn path(&self) -> &[PageId] {
        match self {
            Self::ReachedTarget { path }
            | Self::CycleDetected { path, .. }
            | Self::NoEligibleLink { path, .. }
            | Self::BudgetExceeded { path } => path,
        }
    }

    /// Number of hops taken
    pub fn hops(&self) -> usize {
        self.path().len().saturating_sub(1)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::ReachedTarget { .. })
    }

    /// Stable name of the variant, used in logs and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReachedTarget { .. } => "reached_target",
            Self::CycleDetected { .. } => "cycle_detected",
            Self::NoEligibleLink { .. } => "no_eligible_link",
            Self::BudgetExceeded { .. } => "budget_exceeded",
        }
    }

    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ReachedTarget { .. } => 0,
            Self::CycleDetected { .. } => 2,
            Self::NoEligibleLink { .. } => 3,
            Self::BudgetExceeded { .. } => 4,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReachedTarget { path } => match path.last() {
                Some(target) => write!(f, "reached {} after {} hops", target, self.hops()),
                None => write!(f, "reached target"),
            },
            Self::CycleDetected { cycle_start, .. } => write!(
                f,
                "cycle back to {} after {} hops",
                cycle_start,
                self.hops()
            ),
            Self::NoEligibleLink { last_page, .. } => write!(
                f,
                "no eligible link on {} after {} hops",
                last_page,
                self.hops()
            ),
            Self::BudgetExceeded { .. } => {
                write!(f, "hop budget exhausted after {} hops", self.hops())
            }
        }
    }
}
