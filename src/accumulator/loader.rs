use super::types::{Mode, Placement, Position, RaceEntry};
use crate::categories::{Lane, Rank, RunStyle};
use crate::classify::RunnerRecord;
use crate::error::{BiasError, BiasResult};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct DiscreteRow {
    race: u32,
    rank: u8,
    run_style: RunStyle,
    lane: Lane,
}

#[derive(Debug, Deserialize)]
struct ContinuousRow {
    race: u32,
    rank: u8,
    x: f64,
    y: f64,
}

/// Races read from a sheet, grouped by race number in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceSheet {
    pub races: Vec<Vec<RaceEntry>>,
}

impl RaceSheet {
    fn push(&mut self, entry: RaceEntry) {
        match self
            .races
            .iter_mut()
            .find(|group| group.first().map(|e| e.race_number) == Some(entry.race_number))
        {
            Some(group) => group.push(entry),
            None => self.races.push(vec![entry]),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.races.iter().map(Vec::len).sum()
    }
}

fn parse_rank(rank: u8, row: usize) -> BiasResult<Rank> {
    Rank::from_position(rank)
        .ok_or_else(|| BiasError::Validation(format!("row {}: rank {} is not 1-4", row, rank)))
}

/// Reads `race,rank,run_style,lane` (discrete) or `race,rank,x,y`
/// (continuous) rows. Rows are 1-based, header excluded.
pub fn load_race_sheet<R: Read>(reader: R, mode: Mode) -> BiasResult<RaceSheet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut sheet = RaceSheet::default();

    match mode {
        Mode::Discrete => {
            for (i, result) in rdr.deserialize::<DiscreteRow>().enumerate() {
                let row = result?;
                let rank = parse_rank(row.rank, i + 1)?;
                sheet.push(RaceEntry::new(
                    row.race,
                    rank,
                    Placement::Category {
                        run_style: row.run_style,
                        lane: row.lane,
                    },
                ));
            }
        }
        Mode::Continuous => {
            for (i, result) in rdr.deserialize::<ContinuousRow>().enumerate() {
                let row = result?;
                let rank = parse_rank(row.rank, i + 1)?;
                let pos = Position::new(row.x, row.y).map_err(|e| match e {
                    BiasError::Validation(msg) => {
                        BiasError::Validation(format!("row {}: {}", i + 1, msg))
                    }
                    other => other,
                })?;
                sheet.push(RaceEntry::new(row.race, rank, Placement::Position(pos)));
            }
        }
    }

    debug!(
        "Loaded race sheet: {} races, {} entries",
        sheet.races.len(),
        sheet.entry_count()
    );
    Ok(sheet)
}

pub fn load_race_sheet_from_path<P: AsRef<Path>>(path: P, mode: Mode) -> BiasResult<RaceSheet> {
    let file = File::open(path)?;
    load_race_sheet(file, mode)
}

/// Reads a JSON array of `{id, x, y}` records.
pub fn load_runner_records<R: Read>(reader: R) -> BiasResult<Vec<RunnerRecord>> {
    let records: Vec<RunnerRecord> = serde_json::from_reader(reader)?;
    debug!("Loaded {} runner records", records.len());
    Ok(records)
}

pub fn load_runner_records_from_path<P: AsRef<Path>>(path: P) -> BiasResult<Vec<RunnerRecord>> {
    let file = File::open(path)?;
    load_runner_records(file)
}
