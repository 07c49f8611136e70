//! `subtrack-server`: serve the subscription store over GraphQL.

use clap::Parser;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use subtrack::server::{DEFAULT_PATH, DEFAULT_BIND};
use subtrack::{build_schema, Server, ServerConfig, Store, StoreConfig, SubscriptionService};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "subtrack-server", version, about = "Mock GraphQL endpoint for subscription tracking")]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value_t = SocketAddr::from(DEFAULT_BIND))]
    bind: SocketAddr,

    /// HTTP path of the GraphQL endpoint
    #[arg(long, default_value = DEFAULT_PATH)]
    path: String,

    /// Start with an empty store instead of the two fixture records
    #[arg(long)]
    no_seed: bool,

    /// Do not serve GraphiQL on GET requests
    #[arg(long)]
    no_playground: bool,

    /// Print the schema SDL and exit
    #[arg(long)]
    print_schema: bool,
}

impl Cli {
    fn config(&self) -> ServerConfig {
        ServerConfig {
            bind: self.bind,
            path: self.path.clone(),
            playground: !self.no_playground,
            store: StoreConfig {
                seed_fixtures: !self.no_seed,
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    let store = Arc::new(Store::from_config(&config.store));
    let service = SubscriptionService::new(store);

    if cli.print_schema {
        println!("{}", build_schema(service).sdl());
        return ExitCode::SUCCESS;
    }

    let server = match Server::bind(&config, service).await {
        Ok(server) => server,
        Err(err) => {
            error!(error = %err, bind = %config.bind, "failed to start server");
            return ExitCode::FAILURE;
        }
    };

    match server.run_until(shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "server error");
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}
