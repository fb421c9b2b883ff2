use crate::accumulator::{
    BiasAccumulator, BiasSignals, CategoryTotals, Centroid, EntryEdit, Mode, Placement,
    RaceEntry, Recommendation,
};
use crate::categories::Rank;
use crate::classify::{classify_runner, RunnerRecord};
use crate::config::Config;
use crate::error::{BiasError, BiasResult};
use serde::Serialize;
use tracing::info;

/// One user session: the configuration plus the history it accumulates.
/// Mutate through the methods, then pull a fresh [`BiasReport`].
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    accumulator: BiasAccumulator,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub index: usize,
    pub race_number: u32,
    pub rank: Rank,
    pub base_score: u32,
    pub placement: Placement,
}

/// Snapshot of everything a front end renders. Aggregate sections are
/// `None` while the history is empty or when they do not apply to the mode.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BiasReport {
    pub mode: Mode,
    pub races_recorded: usize,
    pub next_race: u32,
    pub entries: Vec<EntryView>,
    pub totals: Option<CategoryTotals>,
    pub recommendation: Option<Recommendation>,
    pub centroid: Option<Centroid>,
    pub signals: Option<BiasSignals>,
}

impl Session {
    pub fn new(config: Config) -> BiasResult<Self> {
        config.validate()?;
        info!(
            "Session started: mode={}, weighted={}, weight_base={}",
            config.accumulator.mode, config.accumulator.weighted, config.accumulator.weight_base
        );
        Ok(Self {
            accumulator: BiasAccumulator::new(config.accumulator.mode),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn accumulator(&self) -> &BiasAccumulator {
        &self.accumulator
    }

    pub fn next_race_number(&self) -> u32 {
        self.accumulator.next_race_number()
    }

    /// Records the next race from placements in finishing order.
    pub fn submit_race(&mut self, placements: [Placement; 4]) -> BiasResult<u32> {
        self.accumulator.record_placements(placements)
    }

    /// Records an already-numbered race, e.g. one read from a race sheet.
    pub fn submit_entries(&mut self, entries: &[RaceEntry]) -> BiasResult<u32> {
        let race = self.accumulator.next_race_number();
        self.accumulator.record_race(entries)?;
        Ok(race)
    }

    /// Buckets raw provider records and records them as the next race.
    /// Records must be the first four finishers in finishing order.
    pub fn submit_runner_records(&mut self, records: &[RunnerRecord]) -> BiasResult<u32> {
        let placements: [Placement; 4] = self
            .classify_records(records)
            .try_into()
            .map_err(|v: Vec<Placement>| {
                BiasError::Validation(format!(
                    "a race needs exactly {} runner records, got {}",
                    Rank::COUNT,
                    v.len()
                ))
            })?;
        self.submit_race(placements)
    }

    pub fn classify_records(&self, records: &[RunnerRecord]) -> Vec<Placement> {
        records
            .iter()
            .map(|r| classify_runner(r, &self.config.thresholds))
            .collect()
    }

    pub fn edit_entry(&mut self, index: usize, edit: EntryEdit) -> BiasResult<RaceEntry> {
        self.accumulator.edit_entry(index, edit).copied()
    }

    pub fn delete_last_race(&mut self) -> Option<Vec<RaceEntry>> {
        let removed = self.accumulator.delete_last_race();
        if let Some(first) = removed.as_ref().and_then(|r| r.first()) {
            info!("Deleted race {}", first.race_number);
        }
        removed
    }

    pub fn reset(&mut self) {
        info!("Session reset ({} entries cleared)", self.accumulator.len());
        self.accumulator.reset();
    }

    pub fn report(&self) -> BiasResult<BiasReport> {
        let acc = &self.accumulator;
        let params = &self.config.accumulator;

        let entries = acc
            .history()
            .iter()
            .enumerate()
            .map(|(index, e)| EntryView {
                index,
                race_number: e.race_number,
                rank: e.rank,
                base_score: e.base_score(),
                placement: e.placement,
            })
            .collect();

        let mut report = BiasReport {
            mode: acc.mode(),
            races_recorded: acc.len() / Rank::COUNT,
            next_race: acc.next_race_number(),
            entries,
            totals: None,
            recommendation: None,
            centroid: None,
            signals: None,
        };

        if acc.is_empty() {
            return Ok(report);
        }

        match acc.mode() {
            Mode::Discrete => {
                let totals = acc.compute_category_totals(params.weighted, params.weight_base)?;
                report.recommendation = totals.recommendation();
                report.totals = Some(totals);
            }
            Mode::Continuous => {
                report.centroid = Some(acc.compute_weighted_centroid(params.weight_base)?);
                report.signals =
                    Some(acc.compute_signals(params.weight_base, &self.config.signals)?);
            }
        }

        Ok(report)
    }
}
