#![allow(dead_code)] // Suppress warnings for unused test helpers

use resmap::config::{NormalizedWeights, WeightConfig};
use resmap::model::Region;

/// Builder for Region to clean up tests
pub struct RegionBuilder {
    region: Region,
}

impl RegionBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            region: Region {
                id: None,
                name: name.to_string(),
                population: Some(50_000),
                median_income: 0.5,
                unemployment_rate: 0.05,
                cost_of_living_index: 0.5,
                disaster_risk: 0.1,
                score: 0.0,
            },
        }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.region.id = Some(id);
        self
    }

    pub fn population(mut self, population: u64) -> Self {
        self.region.population = Some(population);
        self
    }

    pub fn no_population(mut self) -> Self {
        self.region.population = None;
        self
    }

    pub fn indicators(mut self, income: f64, unemployment: f64, cost: f64, disaster: f64) -> Self {
        self.region.median_income = income;
        self.region.unemployment_rate = unemployment;
        self.region.cost_of_living_index = cost;
        self.region.disaster_risk = disaster;
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.region.score = score;
        self
    }

    pub fn build(self) -> Region {
        self.region
    }
}

/// Default slider fractions: 0.50 / 0.25 / 0.15 / 0.10.
pub fn default_fractions() -> NormalizedWeights {
    WeightConfig::default()
        .normalized()
        .expect("default weights are non-zero")
}

/// Reference record: high income, low unemployment, moderate cost,
/// negligible disaster risk, large population.
pub fn prosperous_region() -> Region {
    RegionBuilder::new("Wake")
        .population(50_000)
        .indicators(0.8, 0.1, 0.3, 0.05)
        .build()
}
