#![allow(dead_code)]

use racebias::accumulator::{BiasAccumulator, Mode, Placement, Position, RaceEntry};
use racebias::categories::{Lane, Rank, RunStyle};
use strum::IntoEnumIterator;

pub fn cat(run_style: RunStyle, lane: Lane) -> Placement {
    Placement::Category { run_style, lane }
}

pub fn pos(x: f64, y: f64) -> Placement {
    Placement::Position(Position::new(x, y).unwrap())
}

/// Four entries for `race`, ranks 1st..4th in the given order.
pub fn race(race_number: u32, placements: [Placement; 4]) -> Vec<RaceEntry> {
    Rank::iter()
        .zip(placements)
        .map(|(rank, p)| RaceEntry::new(race_number, rank, p))
        .collect()
}

/// Continuous race whose four finishers all share `x` (y fixed at 5).
pub fn flat_race(race_number: u32, x: f64) -> Vec<RaceEntry> {
    race(race_number, [pos(x, 5.0); 4])
}

pub fn discrete_with(races: &[[Placement; 4]]) -> BiasAccumulator {
    let mut acc = BiasAccumulator::new(Mode::Discrete);
    for placements in races {
        acc.record_placements(*placements).unwrap();
    }
    acc
}

pub fn continuous_with(races: &[[Placement; 4]]) -> BiasAccumulator {
    let mut acc = BiasAccumulator::new(Mode::Continuous);
    for placements in races {
        acc.record_placements(*placements).unwrap();
    }
    acc
}
