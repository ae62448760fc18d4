use clap::{CommandFactory, Parser};
use resmap::config::{WeightAxis, WeightConfig, WEIGHT_MAX, WEIGHT_STEP};
use resmap::error::ResMapError;
use std::io::Write;
use tempfile::NamedTempFile;

// Minimal parser so merge tests can build real ArgMatches the way the
// binary does, without dragging the full CLI in.
#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    weights: WeightConfig,
}

fn parse(args: &[&str]) -> (WeightConfig, clap::ArgMatches) {
    let mut argv = vec!["resmap-test"];
    argv.extend_from_slice(args);
    let matches = TestCli::command().get_matches_from(argv);
    let cli = <TestCli as clap::FromArgMatches>::from_arg_matches(&matches)
        .expect("test args parse");
    (cli.weights, matches)
}

// --- DEFAULTS AND MUTATION ---

#[test]
fn test_default_weights() {
    let w = WeightConfig::default();
    assert_eq!(w.weight_income, 50);
    assert_eq!(w.weight_unemployment, 25);
    assert_eq!(w.weight_cost, 15);
    assert_eq!(w.weight_disaster, 10);
    assert_eq!(w.total(), 100);
    assert!(w.is_balanced());
}

#[test]
fn test_set_clamps_to_max() {
    let mut w = WeightConfig::default();
    w.set(WeightAxis::Cost, 250);
    assert_eq!(w.get(WeightAxis::Cost), WEIGHT_MAX);
    assert!(!w.is_balanced());
}

#[test]
fn test_adjust_steps_and_clamps() {
    let mut w = WeightConfig::default();

    assert_eq!(w.adjust(WeightAxis::Income, WEIGHT_STEP), 55);
    assert_eq!(w.adjust(WeightAxis::Income, -WEIGHT_STEP), 50);

    // Walking past either end sticks to the bound.
    assert_eq!(w.adjust(WeightAxis::Disaster, -500), 0);
    assert_eq!(w.adjust(WeightAxis::Disaster, 500), WEIGHT_MAX);
}

#[test]
fn test_reset_restores_defaults() {
    let mut w = WeightConfig::default();
    w.set(WeightAxis::Income, 0);
    w.set(WeightAxis::Unemployment, 90);
    w.reset();
    assert_eq!(w, WeightConfig::default());
}

// --- NORMALIZATION ---

#[test]
fn test_normalized_default_fractions() {
    let n = WeightConfig::default().normalized().unwrap();
    assert_eq!(n.income, 0.5);
    assert_eq!(n.unemployment, 0.25);
    assert_eq!(n.cost, 0.15);
    assert_eq!(n.disaster, 0.1);
}

#[test]
fn test_normalized_unbalanced_sum_is_one() {
    let w = WeightConfig {
        weight_income: 30,
        weight_unemployment: 30,
        weight_cost: 30,
        weight_disaster: 30,
    };
    let n = w.normalized().unwrap();
    let sum = n.income + n.unemployment + n.cost + n.disaster;
    assert!((sum - 1.0).abs() < 1e-12);
    assert_eq!(n.income, 0.25);
}

#[test]
fn test_normalized_rejects_zero_sum() {
    let w = WeightConfig {
        weight_income: 0,
        weight_unemployment: 0,
        weight_cost: 0,
        weight_disaster: 0,
    };
    match w.normalized() {
        Err(ResMapError::DegenerateWeights(msg)) => {
            assert!(msg.contains("weight sum is zero"), "{}", msg);
        }
        other => panic!("Expected DegenerateWeights, got {:?}", other),
    }
}

// --- PROFILE FILES ---

#[test]
fn test_load_full_profile() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"weight_income": 25, "weight_unemployment": 15, "weight_cost": 10, "weight_disaster": 50}}"#
    )
    .unwrap();

    let w = WeightConfig::load_from_file(file.path()).unwrap();
    assert_eq!(w.weight_income, 25);
    assert_eq!(w.weight_disaster, 50);
    assert!(w.is_balanced());
}

#[test]
fn test_load_partial_profile_keeps_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"weight_disaster": 40}}"#).unwrap();

    let w = WeightConfig::load_from_file(file.path()).unwrap();
    assert_eq!(w.weight_disaster, 40);
    assert_eq!(w.weight_income, 50);
    assert_eq!(w.weight_unemployment, 25);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let result = WeightConfig::load_from_file("/nonexistent/weights.json");
    assert!(matches!(result, Err(ResMapError::Io(_))));
}

#[test]
fn test_load_malformed_profile_is_json_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{not json").unwrap();

    let result = WeightConfig::load_from_file(file.path());
    assert!(matches!(result, Err(ResMapError::Json(_))));
}

// --- CLI OVERLAY ---

#[test]
fn test_merge_overrides_only_explicit_flags() {
    // Profile sets a disaster-heavy mix; the user only overrides income.
    let mut profile = WeightConfig {
        weight_income: 25,
        weight_unemployment: 15,
        weight_cost: 10,
        weight_disaster: 50,
    };
    let (cli_weights, matches) = parse(&["--weight-income", "60"]);

    profile.merge_from_cli(&cli_weights, &matches);

    assert_eq!(profile.weight_income, 60);
    assert_eq!(profile.weight_unemployment, 15);
    assert_eq!(profile.weight_cost, 10);
    assert_eq!(profile.weight_disaster, 50);
}

#[test]
fn test_merge_without_flags_keeps_profile() {
    let mut profile = WeightConfig {
        weight_income: 5,
        weight_unemployment: 5,
        weight_cost: 5,
        weight_disaster: 85,
    };
    let original = profile;
    let (cli_weights, matches) = parse(&[]);

    profile.merge_from_cli(&cli_weights, &matches);

    assert_eq!(profile, original);
}

#[test]
fn test_merge_all_flags_replaces_profile() {
    let mut profile = WeightConfig::default();
    let (cli_weights, matches) = parse(&[
        "--weight-income",
        "10",
        "--weight-unemployment",
        "20",
        "--weight-cost",
        "30",
        "--weight-disaster",
        "40",
    ]);

    profile.merge_from_cli(&cli_weights, &matches);

    assert_eq!(profile, cli_weights);
    assert_eq!(profile.total(), 100);
}
