use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Finishing position of a placed runner. Only the first four are recorded.
#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub enum Rank {
    #[strum(to_string = "1st")]
    First,
    #[strum(to_string = "2nd")]
    Second,
    #[strum(to_string = "3rd")]
    Third,
    #[strum(to_string = "4th")]
    Fourth,
}

impl Rank {
    pub const COUNT: usize = 4;

    /// Fixed score table: 1st=4, 2nd=3, 3rd=2, 4th=1.
    pub fn base_score(&self) -> u32 {
        match self {
            Self::First => 4,
            Self::Second => 3,
            Self::Third => 2,
            Self::Fourth => 1,
        }
    }

    /// 1-based finishing position.
    pub fn position(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
        }
    }

    pub fn from_position(pos: u8) -> Option<Self> {
        Self::iter().find(|r| r.position() == pos)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RunStyle {
    FrontRunner,
    MidPack,
    Closer,
}

#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    Rail,
    SecondTrack,
    Wide,
}

/// A closed, ordered category set. Declaration order is the tie-break order.
pub trait CategoryAxis: IntoEnumIterator + Copy + PartialEq + std::fmt::Display {
    /// Heading used for the axis in report tables.
    const AXIS_NAME: &'static str;
}

impl CategoryAxis for RunStyle {
    const AXIS_NAME: &'static str = "Run Style";
}

impl CategoryAxis for Lane {
    const AXIS_NAME: &'static str = "Lane";
}
