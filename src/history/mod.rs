//! Topic navigation and visit history.
//!
//! [`Navigation`] is a pure state machine over topic indices. It never
//! renders; the caller renders whatever topic it reports after a successful
//! move.

use tracing::debug;

/// Default number of visits kept.
pub const DEFAULT_HISTORY_MAX: usize = 10;

/// Bounds for the configurable history size.
pub const MIN_HISTORY_MAX: usize = 1;
pub const MAX_HISTORY_MAX: usize = 100;

/// A previously viewed topic and the line it was scrolled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub topic: usize,
    pub line: usize,
}

/// Why a navigation request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("topic index {index} out of range ({count} topics)")]
    TopicOutOfRange { index: usize, count: usize },

    #[error("history offset {offset} out of range (position {position}, {len} visits)")]
    HistoryOutOfRange {
        offset: isize,
        position: usize,
        len: usize,
    },

    #[error("history target was evicted")]
    Evicted,
}

/// Result of a successful navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moved {
    /// Topic now selected
    pub topic: Option<usize>,
    /// Line to scroll back to, for history moves
    pub restore_line: Option<usize>,
}

/// Current topic, bounded visit log and a position within it.
///
/// `position` is always within `0..=visits.len()`; equal to the length means
/// the live edge, where the next go-to appends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    current: Option<usize>,
    visits: Vec<Visit>,
    position: usize,
    max: usize,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_MAX)
    }
}

impl Navigation {
    pub fn new(max: usize) -> Self {
        Self {
            current: None,
            visits: Vec::new(),
            position: 0,
            max: clamp_max(max),
        }
    }

    pub const fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub const fn position(&self) -> usize {
        self.position
    }

    pub const fn max(&self) -> usize {
        self.max
    }

    /// Change the history bound. Takes effect on the next recorded visit.
    pub fn set_max(&mut self, max: usize) {
        self.max = clamp_max(max);
    }

    /// Forget the selection and all visits.
    pub fn reset(&mut self) {
        self.current = None;
        self.visits.clear();
        self.position = 0;
    }

    /// Select `topic` (or nothing), discarding forward history.
    ///
    /// `current_line` is recorded as the scroll position of the topic being
    /// left. `topic_count` bounds valid indices.
    ///
    /// # Errors
    /// Rejects an index outside `0..topic_count`; state is unchanged.
    pub fn go_to(
        &mut self,
        topic: Option<usize>,
        topic_count: usize,
        current_line: usize,
    ) -> Result<Moved, NavigationError> {
        if let Some(index) = topic
            && index >= topic_count
        {
            return Err(NavigationError::TopicOutOfRange {
                index,
                count: topic_count,
            });
        }

        if let Some(current) = self.current {
            self.record(current, current_line, true);
            self.evict();
        }

        self.current = topic;
        self.position = self.visits.len();
        debug!(?topic, position = self.position, "go to topic");
        Ok(Moved {
            topic,
            restore_line: None,
        })
    }

    /// Move `offset` entries through the visit log, keeping forward history.
    ///
    /// # Errors
    /// Rejects a target outside the log, or one evicted while recording the
    /// topic being left. State is unchanged on rejection.
    pub fn navigate_history(
        &mut self,
        offset: isize,
        current_line: usize,
    ) -> Result<Moved, NavigationError> {
        let out_of_range = NavigationError::HistoryOutOfRange {
            offset,
            position: self.position,
            len: self.visits.len(),
        };
        let target = self
            .position
            .checked_add_signed(offset)
            .filter(|&target| target < self.visits.len())
            .ok_or(out_of_range)?;

        let mut next = self.clone();
        let mut target = Some(target);
        if let Some(current) = next.current {
            next.record(current, current_line, false);
            let dropped = next.evict();
            target = target.and_then(|t| t.checked_sub(dropped));
        }
        let target = target.ok_or(NavigationError::Evicted)?;

        let visit = next.visits[target];
        next.position = target;
        next.current = Some(visit.topic);
        *self = next;
        debug!(topic = visit.topic, position = target, "history move");
        Ok(Moved {
            topic: Some(visit.topic),
            restore_line: Some(visit.line),
        })
    }

    /// Write the visit for the topic being left at the current position.
    fn record(&mut self, topic: usize, line: usize, truncate: bool) {
        let visit = Visit { topic, line };
        if self.position < self.visits.len() {
            self.visits[self.position] = visit;
            if truncate {
                self.visits.truncate(self.position + 1);
            }
        } else {
            self.visits.push(visit);
        }
    }

    /// Drop the oldest visits beyond the bound and return how many went.
    fn evict(&mut self) -> usize {
        let excess = self.visits.len().saturating_sub(self.max);
        if excess > 0 {
            self.visits.drain(..excess);
            self.position = self.position.saturating_sub(excess);
        }
        excess
    }
}

fn clamp_max(max: usize) -> usize {
    max.clamp(MIN_HISTORY_MAX, MAX_HISTORY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPICS: usize = 10;

    fn go(nav: &mut Navigation, topic: usize) {
        nav.go_to(Some(topic), TOPICS, 0).unwrap();
    }

    fn visited(nav: &Navigation) -> Vec<usize> {
        nav.visits().iter().map(|v| v.topic).collect()
    }

    #[test]
    fn test_go_to_back_and_truncate() {
        let mut nav = Navigation::default();
        go(&mut nav, 3);
        go(&mut nav, 5);
        let moved = nav.navigate_history(-1, 0).unwrap();
        assert_eq!(moved.topic, Some(3));
        assert_eq!(nav.current(), Some(3));

        go(&mut nav, 7);
        assert!(nav.navigate_history(1, 0).is_err());
        assert_eq!(nav.current(), Some(7));
        assert_eq!(visited(&nav), vec![3]);
    }

    #[test]
    fn test_back_then_forward_keeps_forward_entries() {
        let mut nav = Navigation::default();
        go(&mut nav, 1);
        go(&mut nav, 2);
        go(&mut nav, 3);
        nav.navigate_history(-1, 0).unwrap();
        nav.navigate_history(-1, 0).unwrap();
        assert_eq!(nav.current(), Some(1));
        assert_eq!(visited(&nav), vec![1, 2, 3]);

        nav.navigate_history(2, 0).unwrap();
        assert_eq!(nav.current(), Some(3));
        assert_eq!(nav.position(), 2);
    }

    #[test]
    fn test_first_go_to_records_nothing() {
        let mut nav = Navigation::default();
        go(&mut nav, 4);
        assert!(nav.visits().is_empty());
        assert_eq!(nav.position(), 0);
        assert!(nav.navigate_history(-1, 0).is_err());
    }

    #[test]
    fn test_go_to_rejects_out_of_range_topic() {
        let mut nav = Navigation::default();
        go(&mut nav, 1);
        let before = nav.clone();
        assert_eq!(
            nav.go_to(Some(TOPICS), TOPICS, 0),
            Err(NavigationError::TopicOutOfRange {
                index: TOPICS,
                count: TOPICS,
            })
        );
        assert_eq!(nav, before);
    }

    #[test]
    fn test_go_to_none_clears_topic() {
        let mut nav = Navigation::default();
        go(&mut nav, 2);
        let moved = nav.go_to(None, TOPICS, 0).unwrap();
        assert_eq!(moved.topic, None);
        assert_eq!(nav.current(), None);
        assert_eq!(visited(&nav), vec![2]);

        // Leaving "no topic" records nothing
        go(&mut nav, 4);
        assert_eq!(visited(&nav), vec![2]);
    }

    #[test]
    fn test_history_move_restores_line() {
        let mut nav = Navigation::default();
        go(&mut nav, 1);
        nav.go_to(Some(2), TOPICS, 40).unwrap();
        let moved = nav.navigate_history(-1, 12).unwrap();
        assert_eq!(moved.restore_line, Some(40));
        let moved = nav.navigate_history(1, 0).unwrap();
        assert_eq!(moved.topic, Some(2));
        assert_eq!(moved.restore_line, Some(12));
    }

    #[test]
    fn test_eviction_keeps_newest_visits() {
        let mut nav = Navigation::new(2);
        for topic in [0, 1, 2, 3] {
            go(&mut nav, topic);
        }
        assert_eq!(visited(&nav), vec![1, 2]);
        assert_eq!(nav.position(), 2);

        let moved = nav.navigate_history(-1, 0).unwrap();
        assert_eq!(moved.topic, Some(2));
        assert_eq!(visited(&nav), vec![2, 3]);
        assert_eq!(nav.position(), 0);
    }

    #[test]
    fn test_evicted_target_leaves_state_unchanged() {
        let mut nav = Navigation::new(1);
        go(&mut nav, 2);
        go(&mut nav, 3);
        let before = nav.clone();
        assert_eq!(nav.navigate_history(-1, 0), Err(NavigationError::Evicted));
        assert_eq!(nav, before);
    }

    #[test]
    fn test_max_is_clamped() {
        assert_eq!(Navigation::new(0).max(), MIN_HISTORY_MAX);
        assert_eq!(Navigation::new(500).max(), MAX_HISTORY_MAX);
        let mut nav = Navigation::default();
        nav.set_max(5);
        assert_eq!(nav.max(), 5);
    }

    #[test]
    fn test_reset() {
        let mut nav = Navigation::default();
        go(&mut nav, 1);
        go(&mut nav, 2);
        nav.reset();
        assert_eq!(nav.current(), None);
        assert!(nav.visits().is_empty());
        assert_eq!(nav.position(), 0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            GoTo(Option<usize>),
            Move(isize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                prop::option::of(0..TOPICS + 2).prop_map(Op::GoTo),
                (-3isize..=3).prop_map(Op::Move),
            ]
        }

        proptest! {
            #[test]
            fn position_and_length_stay_bounded(
                max in 1usize..6,
                ops in prop::collection::vec(op(), 0..60),
            ) {
                let mut nav = Navigation::new(max);
                for op in ops {
                    let before = nav.clone();
                    let result = match op {
                        Op::GoTo(topic) => nav.go_to(topic, TOPICS, 0),
                        Op::Move(offset) => nav.navigate_history(offset, 0),
                    };
                    if result.is_err() {
                        prop_assert_eq!(&nav, &before);
                    }
                    prop_assert!(nav.position() <= nav.visits().len());
                    prop_assert!(nav.visits().len() <= nav.max());
                    prop_assert!(nav.visits().iter().all(|v| v.topic < TOPICS));
                }
            }
        }
    }
}
