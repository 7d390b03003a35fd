use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chatrelay::connector::adapter::http;
use chatrelay::connector::api::Router;
use chatrelay::{Commands, Container, ContainerConfig, RelayConfig};

#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// API key for the assistant service (defaults to $OPENAI_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Assistant that processes runs (defaults to $OPENAI_ASSISTANT_ID)
    #[arg(long, global = true)]
    assistant_id: Option<String>,

    /// Base URL of the assistant API (defaults to $OPENAI_BASE_URL or the hosted API)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Answer from an in-process mock assistant instead of the network
    #[arg(long, global = true)]
    mock_api: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut relay = RelayConfig::from_env();
    if let Some(key) = cli.api_key {
        relay = relay.with_api_key(key);
    }
    if let Some(assistant) = cli.assistant_id {
        relay = relay.with_assistant_id(assistant);
    }
    if let Some(base) = cli.base_url {
        relay = relay.with_base_url(base);
    }

    let container = Container::new(ContainerConfig {
        relay,
        mock_api: cli.mock_api,
    });

    if let Commands::Serve { port, public } = cli.command {
        let ip = if public {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        };
        info!("Starting chat relay server");
        return http::serve(Arc::new(container), SocketAddr::new(ip, port)).await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
