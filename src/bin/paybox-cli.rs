use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paybox_gateway::config::loader::load_config;
use paybox_gateway::endpoint::probe::HttpProbe;
use paybox_gateway::GatewayRequest;

#[derive(Parser)]
#[command(name = "paybox-cli")]
#[command(about = "Inspection CLI for the Paybox gateway request builder", long_about = None)]
struct Cli {
    /// Path to the gateway configuration file.
    #[arg(short, long, default_value = "gateway.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration file
    Check,
    /// Compute the canonical string and signature for a context
    Sign {
        /// Context name to sign under
        #[arg(short = 'x', long)]
        context: String,
        /// Field overrides as KEY=VALUE pairs
        #[arg(short, long = "param")]
        params: Vec<String>,
    },
    /// Resolve a live gateway endpoint for a context
    Endpoint {
        /// Context name to select for
        #[arg(short = 'x', long)]
        context: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paybox_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Check => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "config": cli.config,
                    "contexts": config.contexts.keys().collect::<Vec<_>>(),
                    "valid": true,
                }))?
            );
        }
        Commands::Sign { context, params } => {
            let mut request = GatewayRequest::new(config.contexts, config.servers);
            request.set_context(Some(context.as_str()))?;

            for pair in &params {
                let (name, value) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", pair))?;
                request.set_parameter(name, value);
            }

            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "context": context,
                    "canonical": request.canonical_string(),
                    "signature": request.compute_signature()?,
                }))?
            );
        }
        Commands::Endpoint { context } => {
            let probe = HttpProbe::new(&config.probe);
            let mut request = GatewayRequest::new(config.contexts, config.servers);
            request.set_context(Some(context.as_str()))?;

            let server = request.resolve_endpoint(&probe).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "context": context,
                    "host": server.host,
                    "url": server.health_url(),
                }))?
            );
        }
    }

    Ok(())
}
