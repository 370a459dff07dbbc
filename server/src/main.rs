use cityhub::config::Config;
use cityhub::db;
use cityhub_server::{AppState, rest_router, soap_router};
use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    info!("Connecting to database: {}", config.database_url);
    let db = db::init_database(&config.database_url).await?;

    info!("Running migrations...");
    Migrator::up(&db, None).await?;

    let state = AppState::new(db);

    let rest_listener = TcpListener::bind(config.rest_addr).await?;
    info!("REST API listening on http://{}", config.rest_addr);
    let soap_listener = TcpListener::bind(config.soap_addr).await?;
    info!("SOAP service listening on http://{}/ws", config.soap_addr);

    let rest = axum::serve(rest_listener, rest_router(state.clone()).into_make_service())
        .with_graceful_shutdown(shutdown_signal());
    let soap = axum::serve(soap_listener, soap_router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal());

    tokio::try_join!(
        async { rest.await },
        async { soap.await },
    )?;

    Ok(())
}

#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down gracefully...");
}
