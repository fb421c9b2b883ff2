use super::types::{Position, SCALE_MAX};
use crate::error::{BiasError, BiasResult};

/// Maps a 1-based grid column onto the 0-10 scale so races observed with a
/// different number of columns stay comparable. A single-column grid maps
/// to the maximum.
pub fn normalize_column(raw_column: u32, total_columns: u32) -> BiasResult<f64> {
    if total_columns == 0 || raw_column == 0 || raw_column > total_columns {
        return Err(BiasError::Validation(format!(
            "column {} is not within 1..={}",
            raw_column, total_columns
        )));
    }
    if total_columns == 1 {
        return Ok(SCALE_MAX);
    }
    Ok((raw_column - 1) as f64 / (total_columns - 1) as f64 * SCALE_MAX)
}

impl Position {
    /// Builds a position from raw grid cells on both axes.
    pub fn from_grid(
        column: u32,
        total_columns: u32,
        row: u32,
        total_rows: u32,
    ) -> BiasResult<Self> {
        Self::new(
            normalize_column(column, total_columns)?,
            normalize_column(row, total_rows)?,
        )
    }
}
