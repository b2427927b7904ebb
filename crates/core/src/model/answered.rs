use std::collections::HashSet;

use crate::model::ids::QuestionId;

/// Insert-only set of questions that have reached a terminal state.
///
/// The set answers two needs: filtering already-resolved questions out of a
/// resumed module, and counting progress. The count moves only on first
/// insertion, so replaying a completion event can never inflate a progress
/// bar past its question total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnsweredSet {
    ids: HashSet<QuestionId>,
    progress_count: u32,
}

impl AnsweredSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `id` has already been resolved.
    #[must_use]
    pub fn is_answered(&self, id: &QuestionId) -> bool {
        self.ids.contains(id)
    }

    /// Records `id` as resolved.
    ///
    /// Returns `true` only on the first insertion; duplicates leave both
    /// the set and the progress count untouched.
    pub fn mark_answered(&mut self, id: QuestionId) -> bool {
        let first = self.ids.insert(id);
        if first {
            self.progress_count += 1;
        }
        first
    }

    /// Number of distinct resolved questions.
    #[must_use]
    pub fn progress_count(&self) -> u32 {
        self.progress_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Forgets every resolved question, for a session reset.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.progress_count = 0;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_reports_true_and_counts() {
        let mut set = AnsweredSet::new();
        assert!(!set.is_answered(&QuestionId::new("hexagon")));

        assert!(set.mark_answered(QuestionId::new("hexagon")));
        assert!(set.is_answered(&QuestionId::new("hexagon")));
        assert_eq!(set.progress_count(), 1);
    }

    #[test]
    fn duplicate_insert_reports_false_and_keeps_count() {
        let mut set = AnsweredSet::new();
        assert!(set.mark_answered(QuestionId::new("cone")));
        assert!(!set.mark_answered(QuestionId::new("cone")));
        assert!(!set.mark_answered(QuestionId::new("cone")));
        assert_eq!(set.progress_count(), 1);
    }

    #[test]
    fn count_tracks_distinct_ids() {
        let mut set = AnsweredSet::new();
        for id in ["circle", "square", "circle", "kite"] {
            set.mark_answered(QuestionId::new(id));
        }
        assert_eq!(set.progress_count(), 3);
    }

    #[test]
    fn clear_resets_membership_and_count() {
        let mut set = AnsweredSet::new();
        set.mark_answered(QuestionId::new("oval"));
        set.clear();

        assert!(set.is_empty());
        assert_eq!(set.progress_count(), 0);
        assert!(set.mark_answered(QuestionId::new("oval")));
    }
}
