use crate::accumulator::Mode;
use crate::error::{BiasError, BiasResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub accumulator: AccumulatorParams,
    #[command(flatten)]
    pub thresholds: ClassifierThresholds,
    #[command(flatten)]
    pub signals: SignalThresholds,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccumulatorParams {
    #[arg(long, value_enum, default_value_t = Mode::Discrete)]
    pub mode: Mode,

    /// Apply recency weighting (`base_score * weight_base^race`) to category totals.
    #[arg(long, default_value_t = false)]
    pub weighted: bool,

    #[arg(long, default_value_t = 1.0)]
    pub weight_base: f64,
}

impl Default for AccumulatorParams {
    fn default() -> Self {
        Self {
            mode: Mode::Discrete,
            weighted: false,
            weight_base: 1.0,
        }
    }
}

/// Axis thresholds in the raw coordinate space of the data provider.
#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierThresholds {
    // === RUN STYLE (x) ===
    #[arg(long, default_value_t = 750.0)]
    pub run_style_front: f64,
    #[arg(long, default_value_t = 350.0)]
    pub run_style_mid: f64,

    // === LANE (y) ===
    #[arg(long, default_value_t = 35.0)]
    pub lane_rail: f64,
    #[arg(long, default_value_t = 75.0)]
    pub lane_second: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            run_style_front: 750.0,
            run_style_mid: 350.0,
            lane_rail: 35.0,
            lane_second: 75.0,
        }
    }
}

/// Thresholds on the normalized 0-10 scale.
#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SignalThresholds {
    #[arg(long, default_value_t = 3.0)]
    pub dispersion_threshold: f64,
    #[arg(long, default_value_t = 3.5)]
    pub regime_threshold: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            dispersion_threshold: 3.0,
            regime_threshold: 3.5,
        }
    }
}

impl Config {
    /// Parses only. Validate after command-line overrides have been merged.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BiasResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> BiasResult<()> {
        let base = self.accumulator.weight_base;
        if !base.is_finite() || base <= 0.0 {
            return Err(BiasError::Config(format!(
                "weight_base must be a positive finite number, got {}",
                base
            )));
        }

        let t = &self.thresholds;
        if t.run_style_front <= t.run_style_mid {
            return Err(BiasError::Config(format!(
                "run_style_front ({}) must exceed run_style_mid ({})",
                t.run_style_front, t.run_style_mid
            )));
        }
        if t.lane_rail >= t.lane_second {
            return Err(BiasError::Config(format!(
                "lane_rail ({}) must be below lane_second ({})",
                t.lane_rail, t.lane_second
            )));
        }

        let s = &self.signals;
        if s.dispersion_threshold < 0.0 || s.regime_threshold < 0.0 {
            return Err(BiasError::Config(
                "signal thresholds must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlays values the user typed on the command line onto `self`
    /// (typically loaded from a file). Defaults filled in by clap are ignored.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(accumulator, mode);
        update_if_present!(accumulator, weighted);
        update_if_present!(accumulator, weight_base);

        update_if_present!(thresholds, run_style_front);
        update_if_present!(thresholds, run_style_mid);
        update_if_present!(thresholds, lane_rail);
        update_if_present!(thresholds, lane_second);

        update_if_present!(signals, dispersion_threshold);
        update_if_present!(signals, regime_threshold);
    }
}
