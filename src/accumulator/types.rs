use crate::categories::{CategoryAxis, Lane, Rank, RunStyle};
use crate::error::{BiasError, BiasResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, clap::ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Entries carry a run style and a lane.
    Discrete,
    /// Entries carry a normalized `(x, y)` position.
    Continuous,
}

/// Upper bound of the normalized coordinate scale.
pub const SCALE_MAX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> BiasResult<Self> {
        for (axis, v) in [("x", x), ("y", y)] {
            if !v.is_finite() || !(0.0..=SCALE_MAX).contains(&v) {
                return Err(BiasError::Validation(format!(
                    "{} coordinate {} is outside 0..={}",
                    axis, v, SCALE_MAX
                )));
            }
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    Category { run_style: RunStyle, lane: Lane },
    Position(Position),
}

impl Placement {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Category { .. } => Mode::Discrete,
            Self::Position(_) => Mode::Continuous,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category { run_style, lane } => write!(f, "{} / {}", run_style, lane),
            Self::Position(p) => write!(f, "({:.2}, {:.2})", p.x, p.y),
        }
    }
}

/// One ranked finisher in one race. The base score is always derived from
/// the rank; there is no way to store it independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RaceEntry {
    pub race_number: u32,
    pub rank: Rank,
    pub placement: Placement,
}

impl RaceEntry {
    pub fn new(race_number: u32, rank: Rank, placement: Placement) -> Self {
        Self {
            race_number,
            rank,
            placement,
        }
    }

    #[inline]
    pub fn base_score(&self) -> u32 {
        self.rank.base_score()
    }

    /// `base_score * weight_base^race_number`.
    #[inline]
    pub fn weight(&self, weight_base: f64) -> f64 {
        self.base_score() as f64 * weight_base.powf(self.race_number as f64)
    }
}

/// Recency weights only make sense for a positive, finite base.
pub fn check_weight_base(weight_base: f64) -> BiasResult<()> {
    if !weight_base.is_finite() || weight_base <= 0.0 {
        return Err(BiasError::Validation(format!(
            "weight base must be a positive finite number, got {}",
            weight_base
        )));
    }
    Ok(())
}

/// Partial update for `BiasAccumulator::edit_entry`. `None` leaves a field alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntryEdit {
    pub race_number: Option<u32>,
    pub rank: Option<Rank>,
    pub placement: Option<Placement>,
}

/// Totals for every category of one axis, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTotals<C> {
    pub entries: Vec<(C, f64)>,
}

impl<C: CategoryAxis> AxisTotals<C> {
    pub fn get(&self, category: C) -> f64 {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0.0, |(_, v)| *v)
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// Maximal total; ties go to the earliest-declared category.
    pub fn top(&self) -> Option<C> {
        let mut best: Option<(C, f64)> = None;
        for &(c, v) in &self.entries {
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((c, v)),
            }
        }
        best.map(|(c, _)| c)
    }

    /// Descending by total, stable with respect to declaration order.
    pub fn ranked(&self) -> Vec<(C, f64)> {
        let mut out = self.entries.clone();
        out.sort_by(|a, b| b.1.total_cmp(&a.1));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub weighted: bool,
    pub weight_base: f64,
    pub run_style: AxisTotals<RunStyle>,
    pub lane: AxisTotals<Lane>,
}

impl CategoryTotals {
    pub fn recommendation(&self) -> Option<Recommendation> {
        Some(Recommendation {
            run_style: self.run_style.top()?,
            lane: self.lane.top()?,
        })
    }
}

/// The dominant run style + lane pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub run_style: RunStyle,
    pub lane: Lane,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.run_style, self.lane)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    pub total_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasSignals {
    /// Population standard deviation of x over all entries.
    pub dispersion: f64,
    pub highly_dispersed: bool,
    pub latest_race: u32,
    pub latest_mean_x: f64,
    /// `|latest_mean_x - centroid.x|`
    pub regime_shift: f64,
    pub regime_change: bool,
}
