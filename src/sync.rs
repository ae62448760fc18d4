use serde::Serialize;
use tracing::debug;

use crate::config::{WeightAxis, WeightConfig};
use crate::error::RmResult;
use crate::geo::BoundaryLayer;
use crate::model::Region;
use crate::rank;
use crate::score::{self, ScoreBreakdown, Tier};
use crate::store::IndicatorStore;

/// One bar of the ranked chart sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub name: String,
    pub score: f64,
    pub tier: Tier,
}

/// One row of the ranked table sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableEntry {
    pub rank: usize,
    pub name: String,
    pub population: Option<u64>,
    pub median_income: f64,
    pub unemployment_rate: f64,
    pub cost_of_living_index: f64,
    pub disaster_risk: f64,
    pub score: f64,
    pub tier: Tier,
}

/// Summary of the roster-selected region (the dropdown analog).
#[derive(Debug, Clone)]
pub struct SelectionSummary {
    pub name: String,
    pub score: f64,
    pub rank: usize,
    pub tier: Tier,
    pub breakdown: ScoreBreakdown,
}

/// Owns every piece of mutable session state: the indicator store, the
/// weight model, the optional boundary layer, and the derived view
/// sequences. There are no module-level globals; renderers read from here
/// and mutations arrive through the methods below.
pub struct SessionState {
    pub store: IndicatorStore,
    pub weights: WeightConfig,
    /// Store indices, score descending (stable).
    pub ranked: Vec<usize>,
    /// Store indices, alphabetical.
    pub roster: Vec<usize>,
    pub chart: Vec<ChartBar>,
    pub table: Vec<TableEntry>,
    pub boundaries: Option<BoundaryLayer>,
    /// Cursor into `roster`.
    pub selected: usize,
}

impl SessionState {
    /// Builds the session and runs the initial full refresh.
    pub fn new(store: IndicatorStore, weights: WeightConfig) -> RmResult<Self> {
        let mut state = Self {
            store,
            weights,
            ranked: Vec::new(),
            roster: Vec::new(),
            chart: Vec::new(),
            table: Vec::new(),
            boundaries: None,
            selected: 0,
        };
        state.full_refresh()?;
        Ok(state)
    }

    /// The one recompute-and-resync operation. Runs in strict order:
    /// rescore every region, re-sort, restyle the map layer, rebuild the
    /// chart sequence, rebuild the table and roster. Weight normalization
    /// happens first, so a degenerate weight set aborts before any derived
    /// state is touched.
    pub fn full_refresh(&mut self) -> RmResult<()> {
        let normalized = self.weights.normalized()?;

        // 1. Clean O(n) scoring pass over all records.
        self.store.recompute(&normalized);

        // 2. Stable score-descending order.
        self.ranked = rank::sort_score_desc(self.store.regions());

        // 3. Fill tiers and labels follow the new scores; geometry untouched.
        if let Some(layer) = &mut self.boundaries {
            layer.restyle(self.store.regions());
        }

        // 4. Chart sequence from the freshly sorted order.
        self.chart = self
            .ranked
            .iter()
            .filter_map(|&idx| self.store.get(idx))
            .map(|region| ChartBar {
                name: region.name.clone(),
                score: region.score,
                tier: Tier::classify(region.score),
            })
            .collect();

        // 5. Table rows from the same order; roster stays alphabetical.
        self.table = self
            .ranked
            .iter()
            .enumerate()
            .filter_map(|(pos, &idx)| self.store.get(idx).map(|region| (pos, region)))
            .map(|(pos, region)| TableEntry {
                rank: pos + 1,
                name: region.name.clone(),
                population: region.population,
                median_income: region.median_income,
                unemployment_rate: region.unemployment_rate,
                cost_of_living_index: region.cost_of_living_index,
                disaster_risk: region.disaster_risk,
                score: region.score,
                tier: Tier::classify(region.score),
            })
            .collect();
        self.roster = rank::sort_by_name(self.store.regions());
        if self.selected >= self.roster.len() {
            self.selected = 0;
        }

        debug!("Refreshed {} regions", self.store.len());
        Ok(())
    }

    pub fn adjust_weight(&mut self, axis: WeightAxis, delta: i32) -> RmResult<u32> {
        let value = self.weights.adjust(axis, delta);
        self.full_refresh()?;
        Ok(value)
    }

    pub fn set_weight(&mut self, axis: WeightAxis, value: u32) -> RmResult<()> {
        self.weights.set(axis, value);
        self.full_refresh()
    }

    pub fn reset_weights(&mut self) -> RmResult<()> {
        self.weights.reset();
        self.full_refresh()
    }

    /// Deferred spatial join: the boundary fetch resolves independently of
    /// initial scoring, so the layer may arrive at any point.
    pub fn attach_boundaries(&mut self, mut layer: BoundaryLayer) {
        layer.restyle(self.store.regions());
        self.boundaries = Some(layer);
    }

    pub fn select_next(&mut self) {
        if !self.roster.is_empty() {
            self.selected = (self.selected + 1) % self.roster.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.roster.is_empty() {
            self.selected = (self.selected + self.roster.len() - 1) % self.roster.len();
        }
    }

    pub fn selected_region(&self) -> Option<&Region> {
        self.roster
            .get(self.selected)
            .and_then(|&idx| self.store.get(idx))
    }

    pub fn selection(&self) -> Option<SelectionSummary> {
        let &idx = self.roster.get(self.selected)?;
        let region = self.store.get(idx)?;
        let rank = rank::rank_of(&self.ranked, idx)?;
        let normalized = self.weights.normalized().ok()?;
        Some(SelectionSummary {
            name: region.name.clone(),
            score: region.score,
            rank,
            tier: Tier::classify(region.score),
            breakdown: score::score_breakdown(region, &normalized),
        })
    }
}
