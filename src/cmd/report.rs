use clap::{Args, ValueEnum};

use resmap::config::WeightConfig;
use resmap::error::{ResMapError, RmResult};
use resmap::store::IndicatorStore;
use resmap::sync::{SessionState, TableEntry};

use crate::reports;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub weights: WeightConfig,

    /// Only regions whose name contains this substring (case-insensitive).
    #[arg(short, long)]
    pub region: Option<String>,

    /// Append the per-factor breakdown table (table format only).
    #[arg(long, default_value_t = false)]
    pub explain: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write json/csv output to a file instead of stdout.
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run(args: ReportArgs, store: IndicatorStore, weights: WeightConfig) -> RmResult<()> {
    let state = SessionState::new(store, weights)?;

    let entries: Vec<TableEntry> = match &args.region {
        Some(filter) => {
            let needle = filter.to_lowercase();
            state
                .table
                .iter()
                .filter(|e| e.name.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }
        None => state.table.clone(),
    };

    if entries.is_empty() {
        return Err(ResMapError::Validation(format!(
            "no region matches '{}'",
            args.region.unwrap_or_default()
        )));
    }

    match args.format {
        OutputFormat::Table => {
            reports::print_ranking_report(&entries, &state.weights);
            if args.explain {
                reports::print_breakdown_report(&state, &entries)?;
            }
        }
        OutputFormat::Json => reports::write_json(&entries, args.out.as_deref())?,
        OutputFormat::Csv => reports::write_csv(&entries, args.out.as_deref())?,
    }

    Ok(())
}
