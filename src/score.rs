use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::config::NormalizedWeights;
use crate::model::Region;

pub const SMALL_POP_CUTOFF: u64 = 2_000;
pub const MID_POP_CUTOFF: u64 = 10_000;
pub const SMALL_POP_FACTOR: f64 = 0.92;
pub const MID_POP_FACTOR: f64 = 0.95;

const GOOD_THRESHOLD: f64 = 0.7;
const MODERATE_THRESHOLD: f64 = 0.5;

/// Three-way score bucketing shared by map fill, chart bars, table rows, and
/// report coloring. [`Tier::classify`] is the only place the thresholds live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    Good,
    Moderate,
    Poor,
}

impl Tier {
    pub fn classify(score: f64) -> Tier {
        if score > GOOD_THRESHOLD {
            Tier::Good
        } else if score > MODERATE_THRESHOLD {
            Tier::Moderate
        } else {
            Tier::Poor
        }
    }
}

/// Per-factor decomposition of one region's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub income_term: f64,
    pub unemployment_term: f64,
    pub cost_term: f64,
    pub disaster_term: f64,
    pub raw: f64,
    pub clamped: f64,
    pub penalty_factor: f64,
    pub score: f64,
}

/// Multiplicative penalty for small populations. Absent population means no
/// penalty; the upper cutoff is exclusive.
pub fn population_penalty(population: Option<u64>) -> f64 {
    match population {
        Some(p) if p < SMALL_POP_CUTOFF => SMALL_POP_FACTOR,
        Some(p) if p < MID_POP_CUTOFF => MID_POP_FACTOR,
        _ => 1.0,
    }
}

/// Pure scoring pass for one region. High income raises the score; high
/// unemployment, cost of living, and disaster risk lower it. The weighted
/// sum is clamped to [0,1] before the population factor; the factor is <= 1,
/// so the product cannot leave the range and no second clamp is needed.
pub fn score_breakdown(region: &Region, weights: &NormalizedWeights) -> ScoreBreakdown {
    let income_term = region.median_income * weights.income;
    let unemployment_term = (1.0 - region.unemployment_rate) * weights.unemployment;
    let cost_term = (1.0 - region.cost_of_living_index) * weights.cost;
    let disaster_term = (1.0 - region.disaster_risk) * weights.disaster;

    let raw = income_term + unemployment_term + cost_term + disaster_term;
    let clamped = raw.clamp(0.0, 1.0);
    let penalty_factor = population_penalty(region.population);

    ScoreBreakdown {
        income_term,
        unemployment_term,
        cost_term,
        disaster_term,
        raw,
        clamped,
        penalty_factor,
        score: clamped * penalty_factor,
    }
}

pub fn resilience_score(region: &Region, weights: &NormalizedWeights) -> f64 {
    score_breakdown(region, weights).score
}

/// Human-readable summary echoing the region's indicator inputs.
pub fn explain(region: &Region, weights: &NormalizedWeights) -> String {
    let breakdown = score_breakdown(region, weights);
    format!(
        "Estimated resilience score: {:.3}. Factors: Income={:.2}, Unemployment={:.2}, Cost={:.2}, DisasterRisk={:.2}.",
        breakdown.score,
        region.median_income,
        region.unemployment_rate,
        region.cost_of_living_index,
        region.disaster_risk,
    )
}

/// Three-decimal rounding for export surfaces; the stored derived score
/// keeps full precision.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
