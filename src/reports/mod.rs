use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::fs;
use std::io;
use tracing::info;

use resmap::config::WeightConfig;
use resmap::error::RmResult;
use resmap::score::{self, round3, Tier};
use resmap::sync::{SessionState, TableEntry};

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Good => Color::Green,
        Tier::Moderate => Color::Yellow,
        Tier::Poor => Color::Red,
    }
}

pub fn print_ranking_report(entries: &[TableEntry], weights: &WeightConfig) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Region").add_attribute(Attribute::Bold),
        Cell::new("Pop"),
        Cell::new(format!("Income\nw={}", weights.weight_income)),
        Cell::new(format!("Unemp\nw={}", weights.weight_unemployment)),
        Cell::new(format!("Cost\nw={}", weights.weight_cost)),
        Cell::new(format!("Disaster\nw={}", weights.weight_disaster)),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Tier"),
    ]);

    for i in [0, 2, 3, 4, 5, 6, 7] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for e in entries {
        let pop = match e.population {
            Some(p) => p.to_string(),
            None => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(e.rank),
            Cell::new(&e.name).add_attribute(Attribute::Bold),
            Cell::new(pop),
            Cell::new(format!("{:.2}", e.median_income)),
            Cell::new(format!("{:.2}", e.unemployment_rate)),
            Cell::new(format!("{:.2}", e.cost_of_living_index)),
            Cell::new(format!("{:.2}", e.disaster_risk)),
            Cell::new(format!("{:.3}", e.score)).fg(tier_color(e.tier)),
            Cell::new(e.tier.to_string()).fg(tier_color(e.tier)),
        ]);
    }

    println!("\n{}", table);

    if !weights.is_balanced() {
        println!(
            "⚠️  Weights sum to {} (expected 100); scores use the normalized fractions.",
            weights.total()
        );
    }
}

/// Per-factor contributions for each listed region, in score order.
pub fn print_breakdown_report(state: &SessionState, entries: &[TableEntry]) -> RmResult<()> {
    let normalized = state.weights.normalized()?;

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Region").add_attribute(Attribute::Bold),
        Cell::new("Income"),
        Cell::new("Unemp"),
        Cell::new("Cost"),
        Cell::new("Disaster"),
        Cell::new("Raw"),
        Cell::new("Penalty"),
        Cell::new("Score").fg(Color::Cyan),
    ]);

    for i in 1..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for e in entries {
        let Some(region) = state.store.regions().iter().find(|r| r.name == e.name) else {
            continue;
        };
        let d = score::score_breakdown(region, &normalized);
        table.add_row(vec![
            Cell::new(&e.name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.3}", d.income_term)),
            Cell::new(format!("{:.3}", d.unemployment_term)),
            Cell::new(format!("{:.3}", d.cost_term)),
            Cell::new(format!("{:.3}", d.disaster_term)),
            Cell::new(format!("{:.3}", d.raw)),
            Cell::new(format!("x{:.2}", d.penalty_factor)),
            Cell::new(format!("{:.3}", d.score)).fg(tier_color(Tier::classify(d.score))),
        ]);
    }

    println!("\n{}", table);

    for e in entries {
        if let Some(region) = state.store.regions().iter().find(|r| r.name == e.name) {
            println!("  {}: {}", e.name, score::explain(region, &normalized));
        }
    }

    Ok(())
}

pub fn write_json(entries: &[TableEntry], out: Option<&str>) -> RmResult<()> {
    let rounded: Vec<TableEntry> = entries
        .iter()
        .map(|e| TableEntry {
            score: round3(e.score),
            ..e.clone()
        })
        .collect();
    let payload = serde_json::to_string_pretty(&rounded)?;

    match out {
        Some(path) => {
            fs::write(path, payload)?;
            info!("💾 Wrote {} entries to {}", rounded.len(), path);
        }
        None => println!("{}", payload),
    }
    Ok(())
}

pub fn write_csv(entries: &[TableEntry], out: Option<&str>) -> RmResult<()> {
    let sink: Box<dyn io::Write> = match out {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut writer = csv::Writer::from_writer(sink);

    writer.write_record([
        "rank",
        "name",
        "population",
        "medianIncome",
        "unemploymentRate",
        "costOfLivingIndex",
        "disasterRisk",
        "score",
        "tier",
    ])?;

    for e in entries {
        writer.write_record(&[
            e.rank.to_string(),
            e.name.clone(),
            e.population.map(|p| p.to_string()).unwrap_or_default(),
            format!("{:.3}", e.median_income),
            format!("{:.3}", e.unemployment_rate),
            format!("{:.3}", e.cost_of_living_index),
            format!("{:.3}", e.disaster_risk),
            format!("{:.3}", e.score),
            e.tier.to_string(),
        ])?;
    }
    writer.flush()?;

    if let Some(path) = out {
        info!("💾 Wrote {} entries to {}", entries.len(), path);
    }
    Ok(())
}
