use serde::{Deserialize, Serialize};

/// One county or state: the indicator bundle plus the derived score.
///
/// Indicators live on the record pre-normalized to the nominal [0,1] range;
/// loaders convert raw sources at ingest (see `store`). Missing indicator
/// fields deserialize to 0.0, a missing population stays absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub median_income: f64,
    #[serde(default)]
    pub unemployment_rate: f64,
    #[serde(default)]
    pub cost_of_living_index: f64,
    #[serde(default)]
    pub disaster_risk: f64,
    /// Derived. Overwritten by every full recompute.
    #[serde(default)]
    pub score: f64,
}

/// Row shape of the pre-normalized state dataset (`resilience_data.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct StateNormRow {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Income_Norm")]
    pub income_norm: f64,
    #[serde(rename = "Unemployment_Norm")]
    pub unemployment_norm: f64,
    #[serde(rename = "Cost_Norm")]
    pub cost_norm: f64,
}

impl From<StateNormRow> for Region {
    fn from(row: StateNormRow) -> Self {
        Region {
            id: None,
            name: row.state,
            population: None,
            median_income: row.income_norm,
            unemployment_rate: row.unemployment_norm,
            cost_of_living_index: row.cost_norm,
            disaster_risk: 0.0,
            score: 0.0,
        }
    }
}

/// Wire row for region datasets. The two source variants carry disjoint
/// required fields, so untagged deserialization picks the right one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RegionRow {
    Normalized(StateNormRow),
    County(Region),
}

impl From<RegionRow> for Region {
    fn from(row: RegionRow) -> Self {
        match row {
            RegionRow::Normalized(r) => r.into(),
            RegionRow::County(r) => r,
        }
    }
}
