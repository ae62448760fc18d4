use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use resmap::config::WeightConfig;
use resmap::error::{ResMapError, RmResult};
use resmap::fetch::{self, ApiClient, DEFAULT_BOUNDARY_URL};
use resmap::geo::{BoundaryLayer, FeatureCollection};
use resmap::store::IndicatorStore;

mod cmd;
mod reports;
mod tui;

#[derive(Parser, Debug)]
#[command(author, version, about = "Regional financial-resilience scoring and dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Local region dataset (county or pre-normalized state format).
    #[arg(global = true, short, long, default_value = "data/counties_nc.json")]
    data: String,

    /// Backend base URL; switches the region source to GET /api/counties.
    #[arg(global = true, long)]
    api: Option<String>,

    #[arg(global = true, long, default_value = DEFAULT_BOUNDARY_URL)]
    geo_url: String,

    /// Local GeoJSON boundary file, overrides --geo-url.
    #[arg(global = true, long)]
    geo_file: Option<String>,

    /// JSON weight profile; explicit --weight-* flags override its entries.
    #[arg(global = true, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive dashboard: bar chart, choropleth, table, weight sliders.
    Dash(cmd::dash::DashArgs),
    /// One-shot ranked report (table, json, or csv).
    Report(cmd::report::ReportArgs),
    /// Query GET /api/score/{id} on a running backend.
    Probe(cmd::probe::ProbeArgs),
}

/// Routes tracing output into the dashboard's log pane so raw-mode drawing
/// is never corrupted.
#[derive(Clone)]
struct ChannelWriter {
    sender: Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(text) = String::from_utf8(buf.to_vec()) {
            let _ = self.sender.send(text);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }))
}

fn init_channel_logging(debug: bool) -> Receiver<String> {
    let (log_tx, log_rx) = mpsc::channel::<String>();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .compact()
        .with_ansi(false)
        .with_writer(move || ChannelWriter {
            sender: log_tx.clone(),
        })
        .init();
    log_rx
}

fn init_stderr_logging(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    // 1. Parse Raw Matches (to distinguish user input from defaults)
    let matches = Cli::command().get_matches();

    // 2. Construct CLI struct (populated with defaults)
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let result = match cli.command {
        Commands::Dash(ref args) => run_dash(&cli, args.clone(), &matches).await,
        Commands::Report(ref args) => run_report(&cli, args.clone(), &matches).await,
        Commands::Probe(ref args) => run_probe(&cli, args.clone()).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ FATAL ERROR:");
        eprintln!("   {}", e);
        process::exit(1);
    }
}

async fn run_dash(cli: &Cli, args: cmd::dash::DashArgs, matches: &ArgMatches) -> RmResult<()> {
    let log_rx = init_channel_logging(cli.debug);
    let weights = resolve_weights(cli, &args.weights, matches.subcommand_matches("dash"))?;

    // The two fetches are independent one-shots; the spatial join simply
    // waits for whichever finishes last.
    let (store, layer) = tokio::join!(load_regions(cli), load_boundaries(cli));
    let store = store?;
    let boundaries = match layer {
        Ok(layer) => Some(layer),
        Err(e) => {
            warn!("⚠️  Boundary geometry unavailable: {}", e);
            None
        }
    };

    cmd::dash::run(store, boundaries, weights, log_rx)
}

async fn run_report(cli: &Cli, args: cmd::report::ReportArgs, matches: &ArgMatches) -> RmResult<()> {
    init_stderr_logging(cli.debug);
    let weights = resolve_weights(cli, &args.weights, matches.subcommand_matches("report"))?;
    let store = load_regions(cli).await?;
    cmd::report::run(args, store, weights)
}

async fn run_probe(cli: &Cli, args: cmd::probe::ProbeArgs) -> RmResult<()> {
    init_stderr_logging(cli.debug);
    let base = cli.api.clone().ok_or_else(|| {
        ResMapError::Config("probe requires --api <base-url> pointing at a running backend".to_string())
    })?;
    cmd::probe::run(args, &ApiClient::new(base)).await
}

/// Weight resolution: the profile file is the base, explicit CLI flags win.
/// Weight flags live inside the subcommand's matches, not the root.
fn resolve_weights(
    cli: &Cli,
    cli_weights: &WeightConfig,
    sub_matches: Option<&ArgMatches>,
) -> RmResult<WeightConfig> {
    match &cli.weights {
        Some(path) => {
            info!("⚖️  Loading weight profile from {}", path);
            let mut profile = WeightConfig::load_from_file(path)?;
            if let Some(matches) = sub_matches {
                profile.merge_from_cli(cli_weights, matches);
            }
            Ok(profile)
        }
        None => Ok(*cli_weights),
    }
}

async fn load_regions(cli: &Cli) -> RmResult<IndicatorStore> {
    match &cli.api {
        Some(base) => {
            let rows = ApiClient::new(base.clone()).fetch_regions().await?;
            IndicatorStore::from_rows(rows)
        }
        None => {
            info!("📂 Loading region data from {}", cli.data);
            IndicatorStore::from_file(&cli.data)
        }
    }
}

async fn load_boundaries(cli: &Cli) -> RmResult<BoundaryLayer> {
    let collection = match &cli.geo_file {
        Some(path) => {
            info!("📂 Loading boundary geometry from {}", path);
            FeatureCollection::load_from_file(path)?
        }
        None => fetch::fetch_boundaries(&cli.geo_url).await?,
    };
    BoundaryLayer::from_collection(collection)
}
