use super::types::{check_weight_base, BiasSignals, Centroid, Placement, Position, RaceEntry};
use crate::config::SignalThresholds;
use crate::error::{BiasError, BiasResult};

fn positions(history: &[RaceEntry]) -> impl Iterator<Item = (&RaceEntry, Position)> + '_ {
    history.iter().filter_map(|e| match e.placement {
        Placement::Position(p) => Some((e, p)),
        Placement::Category { .. } => None,
    })
}

/// `Σ(p_i * w_i) / Σw_i` with `w_i = base_score_i * weight_base^race_i`.
pub fn weighted_centroid(history: &[RaceEntry], weight_base: f64) -> BiasResult<Centroid> {
    check_weight_base(weight_base)?;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut total_weight = 0.0;

    for (entry, pos) in positions(history) {
        let w = entry.weight(weight_base);
        sum_x += pos.x() * w;
        sum_y += pos.y() * w;
        total_weight += w;
    }

    if total_weight == 0.0 {
        return Err(BiasError::DivisionByZero("weighted centroid with zero total weight"));
    }

    Ok(Centroid {
        x: sum_x / total_weight,
        y: sum_y / total_weight,
        total_weight,
    })
}

/// Population standard deviation of the x coordinate.
pub fn dispersion_x(history: &[RaceEntry]) -> BiasResult<f64> {
    let xs: Vec<f64> = positions(history).map(|(_, p)| p.x()).collect();
    if xs.is_empty() {
        return Err(BiasError::DivisionByZero("dispersion of an empty history"));
    }
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    Ok(var.sqrt())
}

/// Mean x of the entries belonging to the highest race number.
pub fn latest_race_mean_x(history: &[RaceEntry]) -> BiasResult<(u32, f64)> {
    let latest = positions(history)
        .map(|(e, _)| e.race_number)
        .max()
        .ok_or(BiasError::DivisionByZero("latest race of an empty history"))?;

    let (sum, count) = positions(history)
        .filter(|(e, _)| e.race_number == latest)
        .fold((0.0, 0usize), |(s, n), (_, p)| (s + p.x(), n + 1));

    Ok((latest, sum / count as f64))
}

pub fn bias_signals(
    history: &[RaceEntry],
    weight_base: f64,
    thresholds: &SignalThresholds,
) -> BiasResult<BiasSignals> {
    let centroid = weighted_centroid(history, weight_base)?;
    let dispersion = dispersion_x(history)?;
    let (latest_race, latest_mean_x) = latest_race_mean_x(history)?;
    let regime_shift = (latest_mean_x - centroid.x).abs();

    Ok(BiasSignals {
        dispersion,
        highly_dispersed: dispersion > thresholds.dispersion_threshold,
        latest_race,
        latest_mean_x,
        regime_shift,
        regime_change: regime_shift > thresholds.regime_threshold,
    })
}
