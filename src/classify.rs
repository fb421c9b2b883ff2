use crate::accumulator::Placement;
use crate::categories::{Lane, RunStyle};
use crate::config::ClassifierThresholds;
use serde::{Deserialize, Serialize};

/// One runner's raw trajectory point as reported by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[inline]
pub fn classify_run_style(x: f64, t: &ClassifierThresholds) -> RunStyle {
    if x > t.run_style_front {
        RunStyle::FrontRunner
    } else if x > t.run_style_mid {
        RunStyle::MidPack
    } else {
        RunStyle::Closer
    }
}

#[inline]
pub fn classify_lane(y: f64, t: &ClassifierThresholds) -> Lane {
    if y < t.lane_rail {
        Lane::Rail
    } else if y < t.lane_second {
        Lane::SecondTrack
    } else {
        Lane::Wide
    }
}

/// Buckets a raw record into the same categories used for manual entry.
pub fn classify_runner(record: &RunnerRecord, t: &ClassifierThresholds) -> Placement {
    Placement::Category {
        run_style: classify_run_style(record.x, t),
        lane: classify_lane(record.y, t),
    }
}
