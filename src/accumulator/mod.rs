pub mod centroid;
pub mod loader;
pub mod normalize;
pub mod totals;
pub mod types;

pub use self::normalize::normalize_column;
pub use self::types::{
    AxisTotals, BiasSignals, CategoryTotals, Centroid, EntryEdit, Mode, Placement, Position,
    RaceEntry, Recommendation, SCALE_MAX,
};
pub use self::types::check_weight_base;
use crate::categories::Rank;
use crate::config::SignalThresholds;
use crate::error::{BiasError, BiasResult};
use strum::IntoEnumIterator;
use tracing::{debug, warn};

/// Owns the race history of one session and answers aggregate queries over it.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasAccumulator {
    mode: Mode,
    history: Vec<RaceEntry>,
}

impl BiasAccumulator {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            history: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn history(&self) -> &[RaceEntry] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Race numbers are derived from history length, never tracked separately.
    pub fn next_race_number(&self) -> u32 {
        (self.history.len() / Rank::COUNT) as u32 + 1
    }

    fn check_mode(&self, placement: &Placement) -> BiasResult<()> {
        if placement.mode() != self.mode {
            return Err(BiasError::Validation(format!(
                "{} placement {} in a {} history",
                placement.mode(),
                placement,
                self.mode
            )));
        }
        Ok(())
    }

    fn require_mode(&self, mode: Mode, operation: &'static str) -> BiasResult<()> {
        if self.mode != mode {
            return Err(BiasError::ModeMismatch {
                operation,
                expected: match mode {
                    Mode::Discrete => "discrete",
                    Mode::Continuous => "continuous",
                },
            });
        }
        Ok(())
    }

    /// Appends one complete race. Rejects anything other than exactly one
    /// entry per rank, all numbered as the next expected race.
    pub fn record_race(&mut self, entries: &[RaceEntry]) -> BiasResult<()> {
        if entries.len() != Rank::COUNT {
            return Err(BiasError::Validation(format!(
                "a race needs exactly {} entries, got {}",
                Rank::COUNT,
                entries.len()
            )));
        }

        let expected = self.next_race_number();
        let mut ordered = Vec::with_capacity(Rank::COUNT);
        for rank in Rank::iter() {
            let mut matching = entries.iter().filter(|e| e.rank == rank);
            let entry = matching.next().ok_or_else(|| {
                BiasError::Validation(format!("race {} is missing a {} place", expected, rank))
            })?;
            if matching.next().is_some() {
                return Err(BiasError::Validation(format!(
                    "race {} has more than one {} place",
                    expected, rank
                )));
            }
            ordered.push(*entry);
        }

        for entry in &ordered {
            if entry.race_number != expected {
                return Err(BiasError::Validation(format!(
                    "entry numbered race {} but the next race is {}",
                    entry.race_number, expected
                )));
            }
            self.check_mode(&entry.placement)?;
        }

        debug!("Recording race {} ({} entries)", expected, ordered.len());
        self.history.extend(ordered);
        Ok(())
    }

    /// Records the next race from placements given in finishing order.
    pub fn record_placements(&mut self, placements: [Placement; 4]) -> BiasResult<u32> {
        let race = self.next_race_number();
        let entries: Vec<RaceEntry> = Rank::iter()
            .zip(placements)
            .map(|(rank, placement)| RaceEntry::new(race, rank, placement))
            .collect();
        self.record_race(&entries)?;
        Ok(race)
    }

    /// Applies an in-place correction. The base score follows the rank
    /// automatically; a rejected edit leaves the entry untouched.
    pub fn edit_entry(&mut self, index: usize, edit: EntryEdit) -> BiasResult<&RaceEntry> {
        let len = self.history.len();
        let mut updated = *self
            .history
            .get(index)
            .ok_or(BiasError::IndexOutOfRange { index, len })?;

        if let Some(race_number) = edit.race_number {
            if race_number == 0 {
                return Err(BiasError::Validation(
                    "race numbers start at 1".to_string(),
                ));
            }
            updated.race_number = race_number;
        }
        if let Some(rank) = edit.rank {
            updated.rank = rank;
        }
        if let Some(placement) = edit.placement {
            self.check_mode(&placement)?;
            updated.placement = placement;
        }

        debug!("Edited entry {}: {:?}", index, updated);
        self.history[index] = updated;
        Ok(&self.history[index])
    }

    /// Drops the last four entries. Returns them, or `None` (and leaves the
    /// history alone) if there is no complete race to remove.
    pub fn delete_last_race(&mut self) -> Option<Vec<RaceEntry>> {
        if self.history.len() < Rank::COUNT {
            warn!(
                "Delete ignored: history holds {} entries, fewer than one race",
                self.history.len()
            );
            return None;
        }
        let start = self.history.len() - Rank::COUNT;
        Some(self.history.split_off(start))
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn compute_category_totals(
        &self,
        weighted: bool,
        weight_base: f64,
    ) -> BiasResult<CategoryTotals> {
        self.require_mode(Mode::Discrete, "category totals")?;
        totals::category_totals(&self.history, weighted, weight_base)
    }

    pub fn compute_weighted_centroid(&self, weight_base: f64) -> BiasResult<Centroid> {
        self.require_mode(Mode::Continuous, "weighted centroid")?;
        centroid::weighted_centroid(&self.history, weight_base)
    }

    pub fn compute_signals(
        &self,
        weight_base: f64,
        thresholds: &SignalThresholds,
    ) -> BiasResult<BiasSignals> {
        self.require_mode(Mode::Continuous, "bias signals")?;
        centroid::bias_signals(&self.history, weight_base, thresholds)
    }
}
