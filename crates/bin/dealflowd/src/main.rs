//! # dealflowd — dealflow daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Spawn the rule engine and staleness monitor as background tasks
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use dealflow_adapter_dispatch_log::LogActionDispatcher;
use dealflow_adapter_http_axum::state::AppState;
use dealflow_adapter_rulegen_genai::GenaiRuleGenerator;
use dealflow_adapter_storage_sqlite_sqlx::pool::Config as DbConfig;
use dealflow_adapter_storage_sqlite_sqlx::{SqliteContactRepository, SqliteRuleRepository};
use dealflow_app::event_bus::InProcessEventBus;
use dealflow_app::rule_engine::RuleEngine;
use dealflow_app::services::contact_service::ContactService;
use dealflow_app::services::rule_service::RuleService;
use dealflow_app::staleness::StalenessMonitor;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(256));

    // Services
    let rule_service = Arc::new(RuleService::new(SqliteRuleRepository::new(pool.clone())));
    let contact_service = Arc::new(ContactService::new(
        SqliteContactRepository::new(pool.clone()),
        Arc::clone(&event_bus),
    ));
    let generator = Arc::new(GenaiRuleGenerator::new(config.generator.model.clone()));

    // Rule engine — consumes every event on the bus
    let engine = RuleEngine::new(
        SqliteRuleRepository::new(pool.clone()),
        SqliteContactRepository::new(pool.clone()),
        Arc::new(LogActionDispatcher::new()),
        Arc::clone(&event_bus),
    );
    let engine_rx = event_bus.subscribe();
    tokio::spawn(async move { engine.run(engine_rx).await });

    // Staleness monitor — periodically flags idle leads
    let monitor = StalenessMonitor::new(
        SqliteContactRepository::new(pool),
        Arc::clone(&event_bus),
        config.staleness_threshold(),
    );
    let scan_interval = config.staleness_interval();
    tokio::spawn(async move { monitor.run(scan_interval).await });

    // HTTP
    let state = AppState::new(rule_service, contact_service, generator, event_bus);
    let app = dealflow_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "dealflowd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(%err, "failed to install sigterm handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
