use std::net::SocketAddr;
use std::sync::Arc;

use forgefit_kvstore::FileKeyValueStore;
use tracing::info;

use forgefit_server::adapter::handler;
use forgefit_server::infrastructure::config::Config;
use forgefit_server::infrastructure::logger::init_logger;
use forgefit_server::infrastructure::startup::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let cfg = Config::load(&config_path)?;

    // Logger
    init_logger(&cfg.app.environment, &cfg.app.log_format);
    cfg.validate()?;

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        "starting forgefit server"
    );

    // Store
    let store = Arc::new(FileKeyValueStore::open(cfg.storage.data_dir.clone())?);
    info!(data_dir = %cfg.storage.data_dir.display(), "key-value store opened");

    // Use cases
    let state = build_state(&cfg, store)?;
    let app = handler::router(state);

    // REST server
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!("REST server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("forgefit server stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
