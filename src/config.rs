use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter};

use crate::error::{ResMapError, RmResult};

/// Upper bound of a single slider, integer percent.
pub const WEIGHT_MAX: u32 = 100;
/// Step applied per slider keypress in the dashboard.
pub const WEIGHT_STEP: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum WeightAxis {
    Income,
    Unemployment,
    Cost,
    Disaster,
}

/// Slider coefficients as integer percentages.
///
/// CLI flags, the JSON profile format, and the dashboard all mutate this one
/// struct. It never recomputes anything itself; the owning session triggers
/// the refresh after a mutation.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    #[arg(long, default_value_t = 50)]
    pub weight_income: u32,
    #[arg(long, default_value_t = 25)]
    pub weight_unemployment: u32,
    #[arg(long, default_value_t = 15)]
    pub weight_cost: u32,
    #[arg(long, default_value_t = 10)]
    pub weight_disaster: u32,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            weight_income: 50,
            weight_unemployment: 25,
            weight_cost: 15,
            weight_disaster: 10,
        }
    }
}

/// Convex-combination fractions produced by [`WeightConfig::normalized`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedWeights {
    pub income: f64,
    pub unemployment: f64,
    pub cost: f64,
    pub disaster: f64,
}

impl WeightConfig {
    pub fn get(&self, axis: WeightAxis) -> u32 {
        match axis {
            WeightAxis::Income => self.weight_income,
            WeightAxis::Unemployment => self.weight_unemployment,
            WeightAxis::Cost => self.weight_cost,
            WeightAxis::Disaster => self.weight_disaster,
        }
    }

    pub fn set(&mut self, axis: WeightAxis, value: u32) {
        let bounded = value.min(WEIGHT_MAX);
        match axis {
            WeightAxis::Income => self.weight_income = bounded,
            WeightAxis::Unemployment => self.weight_unemployment = bounded,
            WeightAxis::Cost => self.weight_cost = bounded,
            WeightAxis::Disaster => self.weight_disaster = bounded,
        }
    }

    /// Nudges one slider, clamped to 0..=100. Returns the new value.
    pub fn adjust(&mut self, axis: WeightAxis, delta: i32) -> u32 {
        let next = (i64::from(self.get(axis)) + i64::from(delta)).clamp(0, i64::from(WEIGHT_MAX));
        self.set(axis, next as u32);
        self.get(axis)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total(&self) -> u32 {
        self.weight_income + self.weight_unemployment + self.weight_cost + self.weight_disaster
    }

    /// Display-only validity flag: the sliders are expected to sum to 100.
    pub fn is_balanced(&self) -> bool {
        self.total() == 100
    }

    /// Scales the coefficients into convex-combination fractions. A zero sum
    /// is rejected before any division takes place.
    pub fn normalized(&self) -> RmResult<NormalizedWeights> {
        let total = self.total();
        if total == 0 {
            return Err(ResMapError::DegenerateWeights(
                "weight sum is zero, cannot normalize".to_string(),
            ));
        }
        let t = f64::from(total);
        Ok(NormalizedWeights {
            income: f64::from(self.weight_income) / t,
            unemployment: f64::from(self.weight_unemployment) / t,
            cost: f64::from(self.weight_cost) / t,
            disaster: f64::from(self.weight_disaster) / t,
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RmResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlays only the flags the user explicitly passed on the command
    /// line, so a profile file keeps its values for everything else.
    pub fn merge_from_cli(&mut self, cli_weights: &WeightConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field;
                }
            };
        }

        update_if_present!(weight_income, "weight_income");
        update_if_present!(weight_unemployment, "weight_unemployment");
        update_if_present!(weight_cost, "weight_cost");
        update_if_present!(weight_disaster, "weight_disaster");
    }
}
