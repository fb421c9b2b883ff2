use crate::reports;
use clap::Args;
use racebias::accumulator::loader::load_runner_records_from_path;
use racebias::config::Config;
use racebias::error::BiasResult;
use racebias::session::Session;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub config: Config,

    /// JSON array of `{id, x, y}` runner records.
    #[arg(short, long)]
    pub records: PathBuf,

    /// Treat the records as the first four finishers of one race and
    /// record them.
    #[arg(long, default_value_t = false)]
    pub record: bool,
}

pub fn run(args: &ClassifyArgs, config: Config) -> BiasResult<()> {
    info!("📂 Loading runner records: {}", args.records.display());
    let records = load_runner_records_from_path(&args.records)?;

    let mut session = Session::new(config)?;
    let placements = session.classify_records(&records);
    reports::print_classification(&records, &placements);

    if args.record {
        session.submit_runner_records(&records)?;
        let report = session.report()?;
        if let Some(totals) = &report.totals {
            reports::print_totals(totals);
        }
        reports::print_summary(&report);
    }
    Ok(())
}
