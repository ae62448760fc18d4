use std::sync::mpsc::Receiver;

use clap::Args;
use tracing::info;

use resmap::config::WeightConfig;
use resmap::error::RmResult;
use resmap::geo::BoundaryLayer;
use resmap::store::IndicatorStore;
use resmap::sync::SessionState;

use crate::tui::DashApp;

#[derive(Args, Debug, Clone)]
pub struct DashArgs {
    #[command(flatten)]
    pub weights: WeightConfig,
}

/// Builds the session and hands it to the terminal UI. Weight flags were
/// already merged by main, so only the resolved config arrives here.
pub fn run(
    store: IndicatorStore,
    boundaries: Option<BoundaryLayer>,
    weights: WeightConfig,
    log_rx: Receiver<String>,
) -> RmResult<()> {
    let mut state = SessionState::new(store, weights)?;
    if let Some(layer) = boundaries {
        state.attach_boundaries(layer);
        info!(
            "🗺️  Boundary join: {} of {} features matched",
            state
                .boundaries
                .as_ref()
                .map(|l| l.matched_count())
                .unwrap_or(0),
            state
                .boundaries
                .as_ref()
                .map(|l| l.features.len())
                .unwrap_or(0)
        );
    }

    info!("🚀 Dashboard ready: {} regions", state.store.len());
    let app = DashApp::new(state, log_rx)?;
    app.run()
}
