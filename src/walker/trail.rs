use crate::title::PageId;
use std::collections::HashSet;

/// State of one walk in progress
///
/// Invariants, held after every hop:
/// - `path().len() == step() + 1`
/// - the visited set is exactly the set of pages in the path
/// - no page appears twice in the path
#[derive(Debug, Clone)]
pub struct Trail {
    path: Vec<PageId>,
    visited: HashSet<PageId>,
    step: u32,
}

impl Trail {
    /// Starts a trail at `start` with no hops taken
    pub fn new(start: PageId) -> Self {
        let mut visited = HashSet::new();
        visited.insert(start.clone());
        Self {
            path: vec![start],
            visited,
            step: 0,
        }
    }

    /// The page the walk is currently on
    pub fn current(&self) -> &PageId {
        // path always holds at least the start page
        &self.path[self.path.len() - 1]
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn path(&self) -> &[PageId] {
        &self.path
    }

    /// Returns true if the page is already on the trail
    pub fn contains(&self, page: &PageId) -> bool {
        self.visited.contains(page)
    }

    /// Records a hop to a page not yet on the trail
    ///
    /// Returns false, leaving the trail unchanged, if the page was already
    /// visited.
    pub fn advance(&mut self, page: PageId) -> bool {
        if !self.visited.insert(page.clone()) {
            return false;
        }
        self.path.push(page);
        self.step += 1;
        true
    }

    /// Replaces the current page with the title it was actually served under
    ///
    /// The step count is unchanged. Returns false, leaving the trail
    /// unchanged, if `page` is an earlier page on the trail.
    pub fn rename_current(&mut self, page: PageId) -> bool {
        if page == *self.current() {
            return true;
        }
        if !self.visited.insert(page.clone()) {
            return false;
        }
        if let Some(last) = self.path.last_mut() {
            let alias = std::mem::replace(last, page);
            self.visited.remove(&alias);
        }
        true
    }

    pub fn into_path(self) -> Vec<PageId> {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str) -> PageId {
        PageId::parse(title).unwrap()
    }

    fn assert_invariants(trail: &Trail) {
        assert_eq!(trail.path().len(), trail.step() as usize + 1);
        let from_path: HashSet<PageId> = trail.path().iter().cloned().collect();
        assert_eq!(from_path, trail.visited);
        assert_eq!(from_path.len(), trail.path().len());
    }

    #[test]
    fn test_new_trail() {
        let trail = Trail::new(page("Sport"));
        assert_eq!(trail.current(), &page("Sport"));
        assert_eq!(trail.step(), 0);
        assert!(trail.contains(&page("Sport")));
        assert_invariants(&trail);
    }

    #[test]
    fn test_advance() {
        let mut trail = Trail::new(page("A"));
        assert!(trail.advance(page("B")));
        assert!(trail.advance(page("C")));
        assert_eq!(trail.current(), &page("C"));
        assert_eq!(trail.step(), 2);
        assert_eq!(trail.path(), &[page("A"), page("B"), page("C")]);
        assert_invariants(&trail);
    }

    #[test]
    fn test_advance_to_visited_page_is_refused() {
        let mut trail = Trail::new(page("A"));
        trail.advance(page("B"));
        assert!(!trail.advance(page("A")));
        assert_eq!(trail.path(), &[page("A"), page("B")]);
        assert_invariants(&trail);
    }

    #[test]
    fn test_rename_current() {
        let mut trail = Trail::new(page("A"));
        trail.advance(page("Philosophical"));
        assert!(trail.rename_current(page("Philosophy")));
        assert_eq!(trail.path(), &[page("A"), page("Philosophy")]);
        assert_eq!(trail.step(), 1);
        assert!(!trail.contains(&page("Philosophical")));
        assert_invariants(&trail);

        assert!(trail.rename_current(page("Philosophy")));
        assert_invariants(&trail);
    }

    #[test]
    fn test_rename_to_visited_page_is_refused() {
        let mut trail = Trail::new(page("A"));
        trail.advance(page("Alias_of_A"));
        assert!(!trail.rename_current(page("A")));
        assert_eq!(trail.path(), &[page("A"), page("Alias_of_A")]);
        assert_invariants(&trail);
    }

    #[test]
    fn test_into_path() {
        let mut trail = Trail::new(page("A"));
        trail.advance(page("B"));
        assert_eq!(trail.into_path(), vec![page("A"), page("B")]);
    }
}
