use resmap::score::{population_penalty, resilience_score, score_breakdown, Tier};
use rstest::rstest;

mod common;
use common::{default_fractions, prosperous_region, RegionBuilder};

const EPS: f64 = 1e-9;

// --- REFERENCE SCENARIOS ---

#[test]
fn test_reference_score_no_penalty() {
    // 0.8*0.5 + 0.9*0.25 + 0.7*0.15 + 0.95*0.1 = 0.825
    let region = prosperous_region();
    let score = resilience_score(&region, &default_fractions());

    assert!(
        (score - 0.825).abs() < EPS,
        "Expected 0.825, got {}",
        score
    );
    assert_eq!(Tier::classify(score), Tier::Good);
}

#[test]
fn test_reference_score_small_population() {
    // Same record at population 1500: 0.825 * 0.92 = 0.759, still good tier.
    let region = RegionBuilder::new("Wake")
        .population(1_500)
        .indicators(0.8, 0.1, 0.3, 0.05)
        .build();
    let score = resilience_score(&region, &default_fractions());

    assert!(
        (score - 0.759).abs() < EPS,
        "Expected 0.759, got {}",
        score
    );
    assert_eq!(Tier::classify(score), Tier::Good);
}

#[test]
fn test_penalty_is_multiplicative_on_clamped_score() {
    let weights = default_fractions();
    let unpenalized = resilience_score(&prosperous_region(), &weights);
    let penalized = resilience_score(
        &RegionBuilder::new("Wake")
            .population(1_500)
            .indicators(0.8, 0.1, 0.3, 0.05)
            .build(),
        &weights,
    );

    assert!(
        (penalized - unpenalized * 0.92).abs() < EPS,
        "Penalized {} is not 0.92 x {}",
        penalized,
        unpenalized
    );
}

// --- POPULATION PENALTY BOUNDARIES ---

#[rstest]
#[case(Some(0), 0.92)]
#[case(Some(1_999), 0.92)]
#[case(Some(2_000), 0.95)]
#[case(Some(9_999), 0.95)]
#[case(Some(10_000), 1.0)] // upper cutoff is exclusive
#[case(Some(1_000_000), 1.0)]
#[case(None, 1.0)]
fn test_population_penalty_boundaries(#[case] population: Option<u64>, #[case] expected: f64) {
    assert_eq!(population_penalty(population), expected);
}

// --- CLAMPING ---

#[test]
fn test_raw_above_one_clamps_before_penalty() {
    // An out-of-range income pushes the raw sum past 1; the clamp caps it,
    // then the penalty applies to the capped value.
    let region = RegionBuilder::new("Outlier")
        .population(1_500)
        .indicators(5.0, 0.0, 0.0, 0.0)
        .build();
    let d = score_breakdown(&region, &default_fractions());

    assert!(d.raw > 1.0);
    assert_eq!(d.clamped, 1.0);
    assert!((d.score - 0.92).abs() < EPS, "Expected 0.92, got {}", d.score);
}

#[test]
fn test_raw_below_zero_clamps_to_zero() {
    let region = RegionBuilder::new("Hostile")
        .indicators(0.0, 2.0, 1.0, 1.0)
        .build();
    let d = score_breakdown(&region, &default_fractions());

    assert!(d.raw < 0.0);
    assert_eq!(d.clamped, 0.0);
    assert_eq!(d.score, 0.0);
    assert_eq!(Tier::classify(d.score), Tier::Poor);
}

// --- BREAKDOWN CONSISTENCY ---

#[test]
fn test_breakdown_terms_sum_to_raw() {
    let region = prosperous_region();
    let d = score_breakdown(&region, &default_fractions());

    let sum = d.income_term + d.unemployment_term + d.cost_term + d.disaster_term;
    assert!((sum - d.raw).abs() < EPS);
    assert!((d.score - d.clamped * d.penalty_factor).abs() < EPS);
}

#[test]
fn test_breakdown_term_directions() {
    // Income contributes directly; the other three enter inverted.
    let weights = default_fractions();
    let d = score_breakdown(&prosperous_region(), &weights);

    assert!((d.income_term - 0.8 * 0.5).abs() < EPS);
    assert!((d.unemployment_term - 0.9 * 0.25).abs() < EPS);
    assert!((d.cost_term - 0.7 * 0.15).abs() < EPS);
    assert!((d.disaster_term - 0.95 * 0.1).abs() < EPS);
}

#[test]
fn test_zero_indicators_score_from_inverted_terms() {
    // All-zero indicators still earn the inverted terms in full.
    let region = RegionBuilder::new("Blank").indicators(0.0, 0.0, 0.0, 0.0).build();
    let score = resilience_score(&region, &default_fractions());

    assert!((score - 0.5).abs() < EPS, "Expected 0.5, got {}", score);
}

// --- TIER THRESHOLDS ---

#[rstest]
#[case(1.0, Tier::Good)]
#[case(0.71, Tier::Good)]
#[case(0.7, Tier::Moderate)] // strictly greater than 0.7
#[case(0.51, Tier::Moderate)]
#[case(0.5, Tier::Poor)] // strictly greater than 0.5
#[case(0.2, Tier::Poor)]
#[case(0.0, Tier::Poor)]
fn test_tier_thresholds(#[case] score: f64, #[case] expected: Tier) {
    assert_eq!(Tier::classify(score), expected);
}

// --- EXPLANATION TEXT ---

#[test]
fn test_explain_mentions_score_and_factors() {
    let text = resmap::score::explain(&prosperous_region(), &default_fractions());

    assert!(text.contains("Estimated resilience score: 0.825"), "{}", text);
    assert!(text.contains("Income=0.80"), "{}", text);
    assert!(text.contains("DisasterRisk=0.05"), "{}", text);
}

// --- ROUNDING ---

#[rstest]
#[case(0.12345, 0.123)]
#[case(0.9996, 1.0)]
#[case(0.0, 0.0)]
fn test_round3(#[case] value: f64, #[case] expected: f64) {
    assert!((resmap::score::round3(value) - expected).abs() < EPS);
}
