use clap::{CommandFactory, FromArgMatches, Parser};
use racebias::accumulator::Mode;
use racebias::config::{AccumulatorParams, ClassifierThresholds, Config, SignalThresholds};
use racebias::error::BiasError;
use std::fs;

// Wraps the flattened config the same way the subcommands do.
#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (Config, clap::ArgMatches) {
    let mut argv = vec!["test"];
    argv.extend_from_slice(args);
    let matches = TestCli::command().get_matches_from(argv);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

#[test]
fn test_clap_defaults_match_default_impl() {
    let (config, _) = parse(&[]);
    assert_eq!(config, Config::default());
    assert_eq!(config.accumulator.mode, Mode::Discrete);
    assert_eq!(config.accumulator.weight_base, 1.0);
    assert_eq!(config.thresholds.run_style_front, 750.0);
    assert_eq!(config.thresholds.lane_second, 75.0);
    assert_eq!(config.signals.dispersion_threshold, 3.0);
    assert_eq!(config.signals.regime_threshold, 3.5);
}

#[test]
fn test_flags_parse() {
    let (config, _) = parse(&["--mode", "continuous", "--weighted", "--weight-base", "1.1"]);
    assert_eq!(config.accumulator.mode, Mode::Continuous);
    assert!(config.accumulator.weighted);
    assert_eq!(config.accumulator.weight_base, 1.1);
}

#[test]
fn test_validate_rejects_bad_weight_base() {
    for base in [0.0, -1.0, f64::NAN] {
        let config = Config {
            accumulator: AccumulatorParams {
                weight_base: base,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BiasError::Config(_))));
    }
}

#[test]
fn test_validate_rejects_inverted_thresholds() {
    let config = Config {
        thresholds: ClassifierThresholds {
            run_style_front: 300.0,
            run_style_mid: 700.0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(BiasError::Config(_))));

    let config = Config {
        thresholds: ClassifierThresholds {
            lane_rail: 80.0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(BiasError::Config(_))));

    let config = Config {
        signals: SignalThresholds {
            dispersion_threshold: -1.0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(BiasError::Config(_))));
}

#[test]
fn test_load_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "accumulator": { "mode": "continuous", "weight_base": 1.1 },
             "thresholds": { "run_style_front": 700.0, "run_style_mid": 300.0 } }"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.accumulator.mode, Mode::Continuous);
    assert_eq!(config.accumulator.weight_base, 1.1);
    assert!(!config.accumulator.weighted);
    assert_eq!(config.thresholds.run_style_front, 700.0);
    assert_eq!(config.thresholds.lane_rail, 35.0);
    assert_eq!(config.signals, SignalThresholds::default());
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(Config::load_from_file(&missing), Err(BiasError::Io(_))));

    let garbage = dir.path().join("garbage.json");
    fs::write(&garbage, "{ not json").unwrap();
    assert!(matches!(Config::load_from_file(&garbage), Err(BiasError::Json(_))));

}

#[test]
fn test_typed_flag_repairs_invalid_file_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "accumulator": { "weight_base": 0.0 } }"#).unwrap();

    let mut file_config = Config::load_from_file(&path).unwrap();
    assert!(matches!(file_config.validate(), Err(BiasError::Config(_))));

    let (cli_config, matches) = parse(&["--weight-base", "1.1"]);
    file_config.merge_from_cli(&cli_config, &matches);

    assert_eq!(file_config.accumulator.weight_base, 1.1);
    assert!(file_config.validate().is_ok());
}

#[test]
fn test_cli_flags_override_file_values_only_when_typed() {
    let (cli_config, matches) = parse(&["--weight-base", "2.0", "--lane-rail", "30"]);

    let mut file_config = Config {
        accumulator: AccumulatorParams {
            mode: Mode::Continuous,
            weighted: true,
            weight_base: 1.1,
        },
        ..Default::default()
    };
    file_config.merge_from_cli(&cli_config, &matches);

    assert_eq!(file_config.accumulator.weight_base, 2.0);
    assert_eq!(file_config.thresholds.lane_rail, 30.0);
    // Not typed: the file wins over clap's defaults.
    assert_eq!(file_config.accumulator.mode, Mode::Continuous);
    assert!(file_config.accumulator.weighted);
}
