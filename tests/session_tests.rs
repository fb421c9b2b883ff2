mod common;

use common::{cat, pos};
use racebias::accumulator::{EntryEdit, Mode};
use racebias::categories::{Lane, Rank, RunStyle};
use racebias::classify::{classify_lane, classify_run_style, RunnerRecord};
use racebias::config::{AccumulatorParams, ClassifierThresholds, Config};
use racebias::error::BiasError;
use racebias::session::Session;
use rstest::rstest;

fn session(mode: Mode) -> Session {
    Session::new(Config {
        accumulator: AccumulatorParams {
            mode,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap()
}

fn record(id: &str, x: f64, y: f64) -> RunnerRecord {
    RunnerRecord {
        id: id.to_string(),
        x,
        y,
    }
}

#[rstest]
#[case(800.0, RunStyle::FrontRunner)]
#[case(400.0, RunStyle::MidPack)]
#[case(100.0, RunStyle::Closer)]
fn test_classify_run_style(#[case] x: f64, #[case] expected: RunStyle) {
    assert_eq!(classify_run_style(x, &ClassifierThresholds::default()), expected);
}

#[rstest]
#[case(10.0, Lane::Rail)]
#[case(50.0, Lane::SecondTrack)]
#[case(90.0, Lane::Wide)]
fn test_classify_lane(#[case] y: f64, #[case] expected: Lane) {
    assert_eq!(classify_lane(y, &ClassifierThresholds::default()), expected);
}

#[test]
fn test_empty_report() {
    let report = session(Mode::Discrete).report().unwrap();
    assert_eq!(report.races_recorded, 0);
    assert_eq!(report.next_race, 1);
    assert!(report.entries.is_empty());
    assert!(report.totals.is_none());
    assert!(report.recommendation.is_none());
    assert!(report.centroid.is_none());
    assert!(report.signals.is_none());
}

#[test]
fn test_discrete_report() {
    let mut s = session(Mode::Discrete);
    s.submit_race([
        cat(RunStyle::MidPack, Lane::Wide),
        cat(RunStyle::MidPack, Lane::Rail),
        cat(RunStyle::Closer, Lane::Wide),
        cat(RunStyle::FrontRunner, Lane::SecondTrack),
    ])
    .unwrap();

    let report = s.report().unwrap();
    assert_eq!(report.races_recorded, 1);
    assert_eq!(report.next_race, 2);
    let scores: Vec<u32> = report.entries.iter().map(|e| e.base_score).collect();
    assert_eq!(scores, vec![4, 3, 2, 1]);

    let rec = report.recommendation.unwrap();
    assert_eq!(rec.run_style, RunStyle::MidPack);
    assert_eq!(rec.lane, Lane::Wide);
    assert_eq!(rec.to_string(), "mid_pack + wide");
    assert!(report.centroid.is_none());
}

#[test]
fn test_edits_show_up_in_next_report() {
    let mut s = session(Mode::Discrete);
    s.submit_race([cat(RunStyle::Closer, Lane::Rail); 4]).unwrap();

    let edited = s
        .edit_entry(
            0,
            EntryEdit {
                rank: Some(Rank::Third),
                placement: Some(cat(RunStyle::FrontRunner, Lane::Wide)),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(edited.base_score(), 2);

    let report = s.report().unwrap();
    assert_eq!(report.entries[0].base_score, 2);
    let totals = report.totals.unwrap();
    assert_eq!(totals.run_style.get(RunStyle::FrontRunner), 2.0);
    assert_eq!(totals.run_style.get(RunStyle::Closer), 6.0);
}

#[test]
fn test_continuous_report_has_centroid_and_signals() {
    let mut s = session(Mode::Continuous);
    s.submit_race([pos(0.0, 1.0), pos(0.0, 1.0), pos(10.0, 1.0), pos(10.0, 1.0)])
        .unwrap();

    let report = s.report().unwrap();
    assert!(report.totals.is_none());
    let c = report.centroid.unwrap();
    // weights 4,3 at x=0 and 2,1 at x=10
    assert!((c.x - 3.0).abs() < 1e-9);
    assert!(report.signals.unwrap().highly_dispersed);
}

#[test]
fn test_report_serializes_camel_case() {
    let mut s = session(Mode::Discrete);
    s.submit_race([cat(RunStyle::Closer, Lane::Rail); 4]).unwrap();

    let value = serde_json::to_value(s.report().unwrap()).unwrap();
    assert_eq!(value["nextRace"], 2);
    assert_eq!(value["racesRecorded"], 1);
    assert_eq!(value["mode"], "discrete");
    assert_eq!(value["entries"][0]["baseScore"], 4);
    assert_eq!(value["entries"][0]["placement"]["run_style"], "closer");
    assert_eq!(value["recommendation"]["runStyle"], "closer");
}

#[test]
fn test_runner_records_feed_the_same_classifier() {
    let mut s = session(Mode::Discrete);
    let records = vec![
        record("5", 800.0, 20.0),
        record("2", 400.0, 50.0),
        record("9", 100.0, 90.0),
        record("1", 780.0, 10.0),
    ];

    let race = s.submit_runner_records(&records).unwrap();
    assert_eq!(race, 1);

    let report = s.report().unwrap();
    let rec = report.recommendation.unwrap();
    assert_eq!(rec.run_style, RunStyle::FrontRunner);
    assert_eq!(rec.lane, Lane::Rail);
}

#[test]
fn test_runner_records_must_make_a_full_race() {
    let mut s = session(Mode::Discrete);
    let records = vec![record("5", 800.0, 20.0), record("2", 400.0, 50.0)];
    assert!(matches!(
        s.submit_runner_records(&records),
        Err(BiasError::Validation(_))
    ));
    assert!(s.accumulator().is_empty());
}

#[test]
fn test_delete_and_reset_through_session() {
    let mut s = session(Mode::Discrete);
    s.submit_race([cat(RunStyle::Closer, Lane::Rail); 4]).unwrap();
    s.submit_race([cat(RunStyle::MidPack, Lane::Rail); 4]).unwrap();

    assert_eq!(s.delete_last_race().map(|r| r.len()), Some(4));
    assert_eq!(s.next_race_number(), 2);

    s.reset();
    assert!(s.accumulator().is_empty());
    assert!(s.delete_last_race().is_none());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = Config {
        accumulator: AccumulatorParams {
            weight_base: -2.0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(Session::new(config), Err(BiasError::Config(_))));
}
