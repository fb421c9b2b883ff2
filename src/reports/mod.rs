use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use racebias::accumulator::{AxisTotals, BiasSignals, CategoryTotals, Centroid, Placement};
use racebias::categories::{CategoryAxis, Lane, RunStyle};
use racebias::classify::RunnerRecord;
use racebias::config::SignalThresholds;
use racebias::session::{BiasReport, EntryView};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn flag_cell(raised: bool) -> Cell {
    if raised {
        Cell::new("YES").fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        Cell::new("no").fg(Color::Green)
    }
}

pub fn print_history(entries: &[EntryView]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Race"),
        Cell::new("Rank"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new(RunStyle::AXIS_NAME),
        Cell::new(Lane::AXIS_NAME),
        Cell::new("X"),
        Cell::new("Y"),
    ]);

    for e in entries {
        let (style, lane, x, y) = match e.placement {
            Placement::Category { run_style, lane } => {
                (
                    run_style.to_string(),
                    lane.to_string(),
                    "-".to_string(),
                    "-".to_string(),
                )
            }
            Placement::Position(p) => (
                "-".to_string(),
                "-".to_string(),
                format!("{:.2}", p.x()),
                format!("{:.2}", p.y()),
            ),
        };
        table.add_row(vec![
            Cell::new(e.index),
            Cell::new(e.race_number),
            Cell::new(e.rank),
            Cell::new(e.base_score).fg(Color::Cyan),
            Cell::new(style),
            Cell::new(lane),
            Cell::new(x),
            Cell::new(y),
        ]);
    }

    align_right(&mut table, 0..=3);
    println!("\n📋 Race History");
    println!("{}", table);
}

fn axis_table<C: CategoryAxis>(axis: &AxisTotals<C>) -> Table {
    let mut table = new_table();
    let sum = axis.sum();
    let top = axis.top();

    table.add_row(vec![
        Cell::new(C::AXIS_NAME).add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Share"),
    ]);

    for (category, total) in axis.ranked() {
        let share = if sum > 0.0 { total / sum * 100.0 } else { 0.0 };
        let name = if Some(category) == top {
            Cell::new(category)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(category)
        };
        table.add_row(vec![
            name,
            Cell::new(format!("{:.2}", total)).fg(Color::Cyan),
            Cell::new(format!("{:.1}%", share)),
        ]);
    }

    align_right(&mut table, 1..=2);
    table
}

pub fn print_totals(totals: &CategoryTotals) {
    if totals.weighted {
        println!("\n🏇 Category Totals (weighted, base {})", totals.weight_base);
    } else {
        println!("\n🏇 Category Totals");
    }
    println!("{}", axis_table(&totals.run_style));
    println!("{}", axis_table(&totals.lane));
}

pub fn print_centroid(centroid: &Centroid, signals: &BiasSignals, limits: &SignalThresholds) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value"),
        Cell::new("Limit"),
        Cell::new("Flag"),
    ]);

    table.add_row(vec![
        Cell::new("Centroid X"),
        Cell::new(format!("{:.3}", centroid.x)).fg(Color::Cyan),
        Cell::new("-"),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new("Centroid Y"),
        Cell::new(format!("{:.3}", centroid.y)).fg(Color::Cyan),
        Cell::new("-"),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new("Dispersion X"),
        Cell::new(format!("{:.3}", signals.dispersion)),
        Cell::new(format!("{:.1}", limits.dispersion_threshold)),
        flag_cell(signals.highly_dispersed),
    ]);
    table.add_row(vec![
        Cell::new(format!("Race {} mean X", signals.latest_race)),
        Cell::new(format!("{:.3}", signals.latest_mean_x)),
        Cell::new("-"),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new("Regime shift"),
        Cell::new(format!("{:.3}", signals.regime_shift)),
        Cell::new(format!("{:.1}", limits.regime_threshold)),
        flag_cell(signals.regime_change),
    ]);

    align_right(&mut table, 1..=2);
    println!("\n🎯 Bias Centroid");
    println!("{}", table);
}

pub fn print_classification(records: &[RunnerRecord], placements: &[Placement]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Runner").add_attribute(Attribute::Bold),
        Cell::new("X"),
        Cell::new("Y"),
        Cell::new(RunStyle::AXIS_NAME),
        Cell::new(Lane::AXIS_NAME),
    ]);

    for (record, placement) in records.iter().zip(placements) {
        let (style, lane) = match placement {
            Placement::Category { run_style, lane } => (run_style.to_string(), lane.to_string()),
            Placement::Position(_) => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(&record.id).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1}", record.x)),
            Cell::new(format!("{:.1}", record.y)),
            Cell::new(style),
            Cell::new(lane),
        ]);
    }

    align_right(&mut table, 1..=2);
    println!("\n🔎 Runner Classification");
    println!("{}", table);
}

pub fn print_summary(report: &BiasReport) {
    println!("\nRaces recorded: {}", report.races_recorded);

    if let Some(rec) = &report.recommendation {
        println!("💡 Strongest bias: {}", rec);
    } else if let Some(c) = &report.centroid {
        println!("💡 Bias point: x={:.2}, y={:.2}", c.x, c.y);
    } else {
        println!("No races recorded yet.");
    }

    if let Some(s) = &report.signals {
        if s.highly_dispersed {
            println!("⚠️  Results are highly dispersed; the bias point may be unreliable.");
        }
        if s.regime_change {
            println!(
                "⚠️  Race {} departs from the trend; the bias may have shifted.",
                s.latest_race
            );
        }
    }
}
