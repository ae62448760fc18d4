use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::error::RmResult;
use crate::geo::FeatureCollection;
use crate::model::{Region, RegionRow};

/// County boundary query used when no boundary source is configured.
pub const DEFAULT_BOUNDARY_URL: &str = "https://gis11.services.ncdot.gov/arcgis/rest/services/NCDOT_CountyBdy_Poly/MapServer/0/query?outFields=*&where=1%3D1&f=geojson";

/// Response shape of `GET /api/score/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreProbe {
    pub score: f64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub county: Option<Region>,
}

/// Thin client for the region backend. One-shot requests, no retry, no
/// timeout beyond the transport defaults.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub async fn fetch_regions(&self) -> RmResult<Vec<RegionRow>> {
        let url = format!("{}/api/counties", self.base_url);
        info!("🌐 Fetching region data from {}", url);
        let rows = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(rows)
    }

    pub async fn fetch_score(&self, id: u64) -> RmResult<ScoreProbe> {
        let url = format!("{}/api/score/{}", self.base_url, id);
        info!("🌐 Probing {}", url);
        let probe = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(probe)
    }
}

/// One-shot boundary geometry fetch; the caller decides how to treat
/// failure (the dashboard degrades to a placeholder map panel).
pub async fn fetch_boundaries(url: &str) -> RmResult<FeatureCollection> {
    info!("🗺️  Fetching boundary geometry from {}", url);
    let collection = Client::new()
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(collection)
}
