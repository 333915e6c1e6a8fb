//! List nesting levels derived from leading-space counts.

use super::types::MAX_LIST_LEVELS;

/// Maximum leading spaces for the first level of a list.
pub const MAX_FIRST_LEVEL_SPACES: usize = 3;

/// Minimum additional spaces needed to open a nested level.
pub const MIN_LEVEL_SPACING: usize = 2;

/// Tracks nesting levels and numbered-item counters for one render.
///
/// Levels are matched by tolerance rather than exact indentation: an item
/// joins whichever recorded level its indentation is closest to, and only
/// opens a new level when indented at least [`MIN_LEVEL_SPACING`] past the
/// innermost one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTracker {
    /// Current level (0 = no list)
    level: usize,
    /// Leading spaces recorded for each level
    spacing: [usize; MAX_LIST_LEVELS],
    /// Numbered item counters per level
    counts: [u32; MAX_LIST_LEVELS],
}

impl ListTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting level (0 when no list is open).
    pub const fn level(&self) -> usize {
        self.level
    }

    pub const fn is_active(&self) -> bool {
        self.level > 0
    }

    /// Forget all levels; the next item starts a fresh list.
    pub const fn close(&mut self) {
        self.level = 0;
    }

    /// Place an item with `spaces` leading spaces and return its level.
    ///
    /// Returns `None` when no list is open and the item is indented too far
    /// to start one.
    pub fn enter_item(&mut self, spaces: usize) -> Option<usize> {
        if self.level == 0 {
            if spaces > MAX_FIRST_LEVEL_SPACES {
                return None;
            }
            self.open_level(spaces);
            return Some(self.level);
        }

        // Closest existing level: stop at the first level nearer to `spaces`
        // than the one after it (s - a < b - s, kept unsigned as 2s < a + b).
        let mut i = 0;
        while i < self.level - 1 {
            if spaces * 2 < self.spacing[i] + self.spacing[i + 1] {
                break;
            }
            i += 1;
        }

        let innermost = i == self.level - 1;
        if innermost
            && spaces >= self.spacing[i] + MIN_LEVEL_SPACING
            && self.level < MAX_LIST_LEVELS
        {
            self.open_level(spaces);
        } else {
            self.level = i + 1;
        }
        Some(self.level)
    }

    /// Advance the numbered counter of the current level and return it.
    pub fn next_number(&mut self) -> u32 {
        let Some(idx) = self.level.checked_sub(1) else {
            return 0;
        };
        self.counts[idx] += 1;
        self.counts[idx]
    }

    fn open_level(&mut self, spaces: usize) {
        self.spacing[self.level] = spaces;
        self.counts[self.level] = 0;
        self.level += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(indents: &[usize]) -> Vec<Option<usize>> {
        let mut tracker = ListTracker::new();
        indents.iter().map(|&s| tracker.enter_item(s)).collect()
    }

    #[test]
    fn test_nesting_by_indentation() {
        assert_eq!(
            levels(&[0, 2, 4, 2, 0]),
            vec![Some(1), Some(2), Some(3), Some(2), Some(1)]
        );
    }

    #[test]
    fn test_small_indent_stays_on_level() {
        assert_eq!(levels(&[0, 1, 0]), vec![Some(1), Some(1), Some(1)]);
    }

    #[test]
    fn test_first_level_rejects_deep_indent() {
        assert_eq!(levels(&[4]), vec![None]);
        assert_eq!(levels(&[3]), vec![Some(1)]);
    }

    #[test]
    fn test_nested_level_tolerates_uneven_indent() {
        // 5 is nearer to the level at 4 than to the level at 0
        assert_eq!(
            levels(&[0, 4, 8, 5]),
            vec![Some(1), Some(2), Some(3), Some(2)]
        );
        // 1 is nearer to level 1 (0) than to level 2 (4)
        assert_eq!(levels(&[0, 4, 1]), vec![Some(1), Some(2), Some(1)]);
    }

    #[test]
    fn test_level_cap() {
        let indents: Vec<usize> = (0..12).map(|n| n * 2).collect();
        let result = levels(&indents);
        assert_eq!(result[9], Some(MAX_LIST_LEVELS));
        assert_eq!(result[10], Some(MAX_LIST_LEVELS));
        assert_eq!(result[11], Some(MAX_LIST_LEVELS));
    }

    #[test]
    fn test_counters_per_level() {
        let mut tracker = ListTracker::new();
        tracker.enter_item(0);
        assert_eq!(tracker.next_number(), 1);
        tracker.enter_item(0);
        assert_eq!(tracker.next_number(), 2);
        tracker.enter_item(2);
        assert_eq!(tracker.next_number(), 1);
        tracker.enter_item(0);
        assert_eq!(tracker.next_number(), 3);
    }

    #[test]
    fn test_reopened_level_resets_counter() {
        let mut tracker = ListTracker::new();
        tracker.enter_item(0);
        tracker.enter_item(2);
        assert_eq!(tracker.next_number(), 1);
        assert_eq!(tracker.next_number(), 2);
        tracker.enter_item(0);
        tracker.enter_item(2);
        assert_eq!(tracker.next_number(), 1);
    }

    #[test]
    fn test_close_starts_fresh_list() {
        let mut tracker = ListTracker::new();
        tracker.enter_item(0);
        tracker.enter_item(2);
        tracker.close();
        assert!(!tracker.is_active());
        assert_eq!(tracker.enter_item(2), Some(1));
        assert_eq!(tracker.next_number(), 1);
    }
}
