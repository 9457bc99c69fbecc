use actix_web::{web, App, HttpServer};
use clap::Parser;
use relay_api::config::RelayConfig;
use relay_api::handlers;
use relay_api::helpers::database::initialize_database;
use relay_api::helpers::webhooks::{create_agent_client, create_lab_report_client};
use relay_api::logging::init_tracing;
use relay_api::storage::SqliteChatStorage;
use relay_api::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "relay-api")]
#[command(version, about = "Chat relay between the portfolio site and the agent webhooks")]
struct Args {
    /// Configuration file (defaults to ./relay.toml and ~/.config/portfolio/relay.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override server.host
    #[arg(long)]
    host: Option<String>,

    /// Override server.port
    #[arg(long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Fail before serving anything if the webhook or database settings are missing
    let mut config = RelayConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _log_guard = init_tracing(&config.logging)?;
    info!(agent = ?config.agent, database = %config.database.path, "Configuration loaded");

    let db = initialize_database(&config.database.path)?;

    let state = web::Data::new(AppState {
        storage: Arc::new(SqliteChatStorage::new(db)),
        agent: create_agent_client(&config)?,
        lab_reports: create_lab_report_client(&config)?,
        agent_timeout: config.agent.timeout(),
    });

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting relay-api server at http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(handlers::cors_headers())
            .configure(handlers::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
