use crate::reports;
use clap::Args;
use racebias::accumulator::loader::load_race_sheet_from_path;
use racebias::accumulator::Mode;
use racebias::config::Config;
use racebias::error::BiasResult;
use racebias::session::Session;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub config: Config,

    /// CSV race sheet: `race,rank,run_style,lane` or `race,rank,x,y`.
    #[arg(short, long)]
    pub sheet: PathBuf,

    /// Remove this many races from the end after replaying.
    #[arg(long, default_value_t = 0)]
    pub undo: usize,

    /// Print the report as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ReplayArgs, config: Config) -> BiasResult<()> {
    info!("📂 Loading race sheet: {}", args.sheet.display());
    let sheet = load_race_sheet_from_path(&args.sheet, config.accumulator.mode)?;

    let mut session = Session::new(config)?;
    for race in &sheet.races {
        session.submit_entries(race)?;
    }
    for _ in 0..args.undo {
        session.delete_last_race();
    }

    let report = session.report()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    reports::print_history(&report.entries);

    match report.mode {
        Mode::Discrete => {
            if let Some(totals) = &report.totals {
                reports::print_totals(totals);
            }
        }
        Mode::Continuous => {
            if let (Some(centroid), Some(signals)) = (&report.centroid, &report.signals) {
                reports::print_centroid(centroid, signals, &session.config().signals);
            }
        }
    }

    reports::print_summary(&report);
    Ok(())
}
