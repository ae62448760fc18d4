use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::NormalizedWeights;
use crate::error::{ResMapError, RmResult};
use crate::model::{Region, RegionRow};
use crate::score;

/// Indicators are nominally in [0,1]; any income above this is treated as a
/// raw dollar figure and the whole column is min-max normalized at ingest.
const RAW_INCOME_SENTINEL: f64 = 1.0;

/// Holds the per-region records fetched once at startup.
#[derive(Debug, Clone, Default)]
pub struct IndicatorStore {
    regions: Vec<Region>,
}

impl IndicatorStore {
    /// Converts wire rows into canonical records. Rows with non-finite
    /// indicator values are skipped with a warning; an empty result is
    /// rejected the same way a failed fetch is.
    pub fn from_rows(rows: Vec<RegionRow>) -> RmResult<Self> {
        let mut regions: Vec<Region> = Vec::with_capacity(rows.len());
        for row in rows {
            let region: Region = row.into();
            if !has_finite_indicators(&region) {
                warn!("⚠️  Skipping '{}': non-finite indicator value", region.name);
                continue;
            }
            regions.push(region);
        }

        if regions.is_empty() {
            return Err(ResMapError::EmptyDataset(
                "no region data received".to_string(),
            ));
        }

        normalize_incomes(&mut regions);
        info!("📊 Loaded {} regions", regions.len());
        Ok(Self { regions })
    }

    pub fn from_reader<R: Read>(mut reader: R) -> RmResult<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let rows: Vec<RegionRow> = serde_json::from_str(&content)?;
        Self::from_rows(rows)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> RmResult<Self> {
        let content = fs::read_to_string(path)?;
        let rows: Vec<RegionRow> = serde_json::from_str(&content)?;
        Self::from_rows(rows)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&self, idx: usize) -> Option<&Region> {
        self.regions.get(idx)
    }

    /// The full-recompute pass: one clean O(n) sweep that overwrites every
    /// derived score. No caching, no dirty tracking.
    pub fn recompute(&mut self, weights: &NormalizedWeights) {
        for region in &mut self.regions {
            region.score = score::resilience_score(region, weights);
        }
    }
}

fn has_finite_indicators(region: &Region) -> bool {
    region.median_income.is_finite()
        && region.unemployment_rate.is_finite()
        && region.cost_of_living_index.is_finite()
        && region.disaster_risk.is_finite()
}

/// Min-max normalization for sources that carry raw dollar incomes. A zero
/// span leaves the values untouched.
fn normalize_incomes(regions: &mut [Region]) {
    if !regions
        .iter()
        .any(|r| r.median_income > RAW_INCOME_SENTINEL)
    {
        return;
    }

    let min = regions
        .iter()
        .fold(f64::INFINITY, |acc, r| acc.min(r.median_income));
    let max = regions
        .iter()
        .fold(f64::NEG_INFINITY, |acc, r| acc.max(r.median_income));
    let span = max - min;
    if span <= 0.0 {
        return;
    }

    debug!("Normalizing raw incomes over [{:.0}, {:.0}]", min, max);
    for region in regions {
        region.median_income = (region.median_income - min) / span;
    }
}
