use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use racebias::config::Config;
use racebias::error::BiasResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file; flags given on the command line win.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Replay(cmd::replay::ReplayArgs),
    Classify(cmd::classify::ClassifyArgs),
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(
    path: Option<&str>,
    cli_config: &Config,
    sub_matches: Option<&ArgMatches>,
) -> BiasResult<Config> {
    let config = match path {
        Some(path) => {
            info!("⚖️  Loading configuration from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            if let Some(m) = sub_matches {
                file_config.merge_from_cli(cli_config, m);
            }
            file_config
        }
        None => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);

    let (cli_config, sub_matches) = match &cli.command {
        Commands::Replay(args) => (&args.config, matches.subcommand_matches("replay")),
        Commands::Classify(args) => (&args.config, matches.subcommand_matches("classify")),
    };

    let config = resolve_config(cli.config_file.as_deref(), cli_config, sub_matches)
        .unwrap_or_else(|e| {
            error!("❌ {}", e);
            process::exit(1);
        });

    let result = match &cli.command {
        Commands::Replay(args) => cmd::replay::run(args, config),
        Commands::Classify(args) => cmd::classify::run(args, config),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
