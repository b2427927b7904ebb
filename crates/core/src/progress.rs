use std::collections::BTreeSet;

use crate::model::ModuleId;

//
// ─── PROGRESS LEDGER ───────────────────────────────────────────────────────────
//

/// Weighted completion ledger behind the global progress bar.
///
/// Each module contributes its [`ModuleId::weight`] once, on first
/// completion. The percentage is recomputed from the full completed set on
/// every read and rounded once at the end; completing every module always
/// reads exactly 100.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressLedger {
    completed: BTreeSet<ModuleId>,
}

impl ProgressLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `part` complete.
    ///
    /// Returns `true` on first completion; repeated calls are absorbed and
    /// return `false`.
    pub fn complete(&mut self, part: ModuleId) -> bool {
        self.completed.insert(part)
    }

    #[must_use]
    pub fn is_complete(&self, part: ModuleId) -> bool {
        self.completed.contains(&part)
    }

    /// Number of completed parts.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Whole-number share of the progress bar, clamped to `0..=100`.
    #[must_use]
    pub fn percent(&self) -> u8 {
        let share: f64 = self.completed.iter().map(|part| part.weight()).sum();
        let percent = (share * 100.0).round().clamp(0.0, 100.0);
        percent as u8
    }

    /// Forgets every completion, for a session reset.
    pub fn clear(&mut self) {
        self.completed.clear();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger_reads_zero() {
        assert_eq!(ProgressLedger::new().percent(), 0);
    }

    #[test]
    fn half_weight_part_rounds_to_eight() {
        let mut ledger = ProgressLedger::new();
        assert!(ledger.complete(ModuleId::Shape2D));
        assert_eq!(ledger.percent(), 8);
    }

    #[test]
    fn both_shape_halves_equal_one_full_module() {
        let mut ledger = ProgressLedger::new();
        ledger.complete(ModuleId::Shape2D);
        ledger.complete(ModuleId::Shape3D);
        assert_eq!(ledger.percent(), 17);

        let mut other = ProgressLedger::new();
        other.complete(ModuleId::SectorArc);
        assert_eq!(other.percent(), 17);
    }

    #[test]
    fn duplicate_completion_changes_nothing() {
        let mut ledger = ProgressLedger::new();
        assert!(ledger.complete(ModuleId::AreaCalc));
        assert!(!ledger.complete(ModuleId::AreaCalc));
        assert!(!ledger.complete(ModuleId::AreaCalc));
        assert_eq!(ledger.percent(), 17);
        assert_eq!(ledger.completed_count(), 1);
    }

    #[test]
    fn percent_walks_up_to_exactly_one_hundred() {
        let mut ledger = ProgressLedger::new();
        let mut seen = Vec::new();
        for module in ModuleId::ALL {
            ledger.complete(module);
            seen.push(ledger.percent());
        }
        assert_eq!(seen, vec![8, 17, 33, 50, 67, 83, 100]);
    }

    #[test]
    fn clear_empties_the_ledger() {
        let mut ledger = ProgressLedger::new();
        ledger.complete(ModuleId::CircleCalc);
        ledger.clear();
        assert_eq!(ledger.percent(), 0);
        assert!(!ledger.is_complete(ModuleId::CircleCalc));
    }
}
