use super::types::{check_weight_base, AxisTotals, CategoryTotals, Placement, RaceEntry};
use crate::categories::{CategoryAxis, Lane, RunStyle};
use crate::error::BiasResult;

/// Seeds every category with zero so untried categories still show up.
fn zeroed<C: CategoryAxis>() -> AxisTotals<C> {
    AxisTotals {
        entries: C::iter().map(|c| (c, 0.0)).collect(),
    }
}

fn add<C: CategoryAxis>(totals: &mut AxisTotals<C>, category: C, amount: f64) {
    if let Some(slot) = totals.entries.iter_mut().find(|(c, _)| *c == category) {
        slot.1 += amount;
    }
}

/// Sums base scores per category on both axes. Entries without a category
/// placement are skipped; the accumulator guarantees there are none.
pub fn category_totals(
    history: &[RaceEntry],
    weighted: bool,
    weight_base: f64,
) -> BiasResult<CategoryTotals> {
    check_weight_base(weight_base)?;
    let mut run_style = zeroed::<RunStyle>();
    let mut lane = zeroed::<Lane>();

    for entry in history {
        let Placement::Category {
            run_style: style,
            lane: draw,
        } = entry.placement
        else {
            continue;
        };

        let amount = if weighted {
            entry.weight(weight_base)
        } else {
            entry.base_score() as f64
        };

        add(&mut run_style, style, amount);
        add(&mut lane, draw, amount);
    }

    Ok(CategoryTotals {
        weighted,
        weight_base,
        run_style,
        lane,
    })
}
