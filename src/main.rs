use anyhow::Result;
use axum::Router;
use power_quality_analyser::{api, config, telemetry};
use config::Config;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal outside development
    let _ = dotenvy::dotenv();

    let cfg = Config::load()?;
    init_tracing(&cfg.log);

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!("Server binding to 0.0.0.0 - the calculator API will be reachable from the network");
    }

    let app_state = api::AppState::new(cfg);

    #[allow(unused_mut)]
    let mut app: Router = api::router(app_state);

    #[cfg(feature = "swagger")]
    {
        app = api::with_swagger(app);
    }

    #[cfg(feature = "metrics")]
    {
        app = api::with_metrics(app);
    }

    info!(%addr, "starting power quality analyser");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
