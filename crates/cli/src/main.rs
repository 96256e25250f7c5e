//! Command Line Interface for LP position metrics.
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use lp_metrics_data::{SubgraphClient, SubgraphConfig};
use lp_metrics_service::PositionMetricsService;
use tracing::info;

#[derive(Parser)]
#[command(name = "lp-metrics")]
#[command(about = "Position metrics for concentrated liquidity LPs", long_about = None)]
struct Cli {
    /// Subgraph endpoint (overrides SUBGRAPH_URL)
    #[arg(long, global = true)]
    subgraph_url: Option<String>,

    /// Subgraph gateway API key (overrides SUBGRAPH_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Print JSON instead of a text report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Metrics for one user/pool position
    Position {
        /// User (transaction origin) address
        #[arg(short, long)]
        user: String,

        /// Pool address
        #[arg(short, long)]
        pool: String,
    },
    /// Metrics for every pool the user has provided liquidity to
    Portfolio {
        /// User (transaction origin) address
        #[arg(short, long)]
        user: String,
    },
}

fn load_config(cli: &Cli) -> Result<SubgraphConfig> {
    let config = match &cli.api_key {
        Some(key) => SubgraphConfig::from_lookup(|name| match name {
            "SUBGRAPH_API_KEY" => Some(key.clone()),
            other => std::env::var(other).ok(),
        })?,
        None => SubgraphConfig::from_env()?,
    };

    Ok(match &cli.subgraph_url {
        Some(url) => config.with_url(url.clone()),
        None => config,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = load_config(&cli)?;
    info!(url = %config.url, "Using subgraph endpoint");
    let service = PositionMetricsService::new(SubgraphClient::new(config)?);

    match &cli.command {
        Commands::Position { user, pool } => {
            if !cli.json {
                println!("🔍 Calculating position metrics...");
                println!("User: {user}");
                println!("Pool: {pool}");
            }

            let metrics = service.compute_position_metrics(user, pool).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                println!("✅ Successfully calculated position metrics!");
                print!("{}", report::Report::new(&metrics));
            }
        }
        Commands::Portfolio { user } => {
            let portfolio = service.compute_all_position_metrics(user).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&portfolio)?);
            } else {
                println!("✅ Found positions in {} pools", portfolio.len());
                for entry in &portfolio {
                    println!("\n🏊 Pool: {}", entry.pool_address);
                    print!("{}", report::Report::new(&entry.metrics));
                }
            }
        }
    }

    Ok(())
}
