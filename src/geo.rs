use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ResMapError, RmResult};
use crate::model::Region;
use crate::score::Tier;

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RmResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<FeatureProps>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// Boundary services disagree on the name property; three spellings are
/// tried in order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProps {
    #[serde(rename = "CountyName", default)]
    pub county_name: Option<String>,
    #[serde(rename = "NAME", default)]
    pub name_upper: Option<String>,
    #[serde(rename = "name", default)]
    pub name_lower: Option<String>,
}

impl FeatureProps {
    pub fn display_name(&self) -> Option<&str> {
        self.county_name
            .as_deref()
            .or(self.name_upper.as_deref())
            .or(self.name_lower.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
}

impl Geometry {
    fn rings(&self) -> Vec<Vec<(f64, f64)>> {
        match self {
            Geometry::Polygon { coordinates } => coordinates
                .iter()
                .map(|ring| ring.iter().map(|p| (p[0], p[1])).collect())
                .collect(),
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flat_map(|poly| {
                    poly.iter()
                        .map(|ring| ring.iter().map(|p| (p[0], p[1])).collect())
                })
                .collect(),
        }
    }
}

/// Join key shared by tabular names and boundary feature names: trim,
/// uppercase, strip a trailing " COUNTY".
pub fn normalize_region_key(name: &str) -> String {
    let upper = name.trim().to_uppercase();
    match upper.strip_suffix(" COUNTY") {
        Some(stem) => stem.trim_end().to_string(),
        None => upper,
    }
}

/// One spatial feature: geometry fixed at load, style re-derived on every
/// refresh. `score` is `None` until a region record matches the key.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    pub key: String,
    pub display_name: String,
    pub rings: Vec<Vec<(f64, f64)>>,
    pub tier: Tier,
    pub label: String,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

#[derive(Debug, Clone)]
pub struct BoundaryLayer {
    pub features: Vec<BoundaryFeature>,
    pub bounds: MapBounds,
}

impl BoundaryLayer {
    /// Extracts rings and join keys once. Features without a usable name or
    /// geometry are dropped here; everything downstream only restyles.
    pub fn from_collection(collection: FeatureCollection) -> RmResult<Self> {
        let mut features = Vec::new();

        for feature in collection.features {
            let name = match feature.properties.as_ref().and_then(|p| p.display_name()) {
                Some(n) => n.to_string(),
                None => {
                    debug!("Skipping boundary feature without a name property");
                    continue;
                }
            };
            let rings = match &feature.geometry {
                Some(geometry) => geometry.rings(),
                None => continue,
            };
            if rings.iter().all(|ring| ring.is_empty()) {
                continue;
            }

            features.push(BoundaryFeature {
                key: normalize_region_key(&name),
                label: name.clone(),
                display_name: name,
                rings,
                tier: Tier::Poor,
                score: None,
            });
        }

        if features.is_empty() {
            return Err(ResMapError::Validation(
                "boundary collection has no usable features".to_string(),
            ));
        }

        let bounds = compute_bounds(&features);
        Ok(Self { features, bounds })
    }

    /// Re-derives fill tier and label per feature from freshly recomputed
    /// scores. Geometry is never touched. A name miss keeps the zero-score
    /// default style and is tolerated per feature.
    pub fn restyle(&mut self, regions: &[Region]) {
        let lookup: HashMap<String, &Region> = regions
            .iter()
            .map(|r| (normalize_region_key(&r.name), r))
            .collect();

        for feature in &mut self.features {
            match lookup.get(&feature.key) {
                Some(region) => {
                    feature.score = Some(region.score);
                    feature.tier = Tier::classify(region.score);
                    feature.label = format!("{}: {:.3}", feature.display_name, region.score);
                }
                None => {
                    feature.score = None;
                    feature.tier = Tier::Poor;
                    feature.label = format!("{}: no data", feature.display_name);
                    debug!(
                        "No region match for boundary feature '{}'",
                        feature.display_name
                    );
                }
            }
        }
    }

    pub fn matched_count(&self) -> usize {
        self.features.iter().filter(|f| f.score.is_some()).count()
    }
}

fn compute_bounds(features: &[BoundaryFeature]) -> MapBounds {
    let mut bounds = MapBounds {
        min_x: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        min_y: f64::INFINITY,
        max_y: f64::NEG_INFINITY,
    };
    for feature in features {
        for ring in &feature.rings {
            for &(x, y) in ring {
                bounds.min_x = bounds.min_x.min(x);
                bounds.max_x = bounds.max_x.max(x);
                bounds.min_y = bounds.min_y.min(y);
                bounds.max_y = bounds.max_y.max(y);
            }
        }
    }
    bounds
}
