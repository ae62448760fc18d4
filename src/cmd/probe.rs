use clap::Args;

use resmap::error::RmResult;
use resmap::fetch::ApiClient;

#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// Region id as assigned by the backend.
    #[arg(long)]
    pub id: u64,
}

/// One-shot round trip against the backend's score endpoint. The dashboard
/// itself never calls it; this exists to exercise deployed servers.
pub async fn run(args: ProbeArgs, client: &ApiClient) -> RmResult<()> {
    let probe = client.fetch_score(args.id).await?;

    println!("\n🎯 Score: {:.3}", probe.score);
    if !probe.explanation.is_empty() {
        println!("   {}", probe.explanation);
    }
    if let Some(county) = probe.county {
        let population = match county.population {
            Some(p) => p.to_string(),
            None => "unknown".to_string(),
        };
        println!("   Region: {} (population {})", county.name, population);
    }

    Ok(())
}
