use std::sync::Arc;

use auth::Authenticator;
use auth::InMemorySessionStore;
use auth::StaticCredentialStore;
use dashboard_service::config::Config;
use dashboard_service::domain::system::service::SystemInfoService;
use dashboard_service::inbound::http::router::create_router;
use dashboard_service::outbound::probes::HttpConnectivityProbe;
use dashboard_service::outbound::probes::SysinfoHostProbe;
use dashboard_service::sweeper::spawn_session_sweeper;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "dashboard-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        host = %config.server.host,
        http_port = config.server.http_port,
        session_ttl_hours = config.session.ttl_hours,
        secure_cookie = config.session.secure_cookie,
        users = config.users.len(),
        "Configuration loaded"
    );

    let credentials = Arc::new(StaticCredentialStore::from_hashes(config.users.clone())?);
    if credentials.is_empty() {
        tracing::warn!("No users configured, nobody will be able to log in");
    }

    let sessions = Arc::new(InMemorySessionStore::new(config.session.ttl()));
    let authenticator = Arc::new(Authenticator::new(credentials, sessions));

    let sweeper = config
        .session
        .sweep_interval()
        .map(|interval| spawn_session_sweeper(Arc::clone(&authenticator), interval));

    let host_probe = Arc::new(SysinfoHostProbe::new());
    let connectivity_probe = Arc::new(HttpConnectivityProbe::new(
        config.system_info.connectivity_url.clone(),
        config.system_info.connectivity_timeout(),
    )?);
    let system_info = Arc::new(SystemInfoService::new(
        host_probe,
        connectivity_probe,
        config.system_info.cache_ttl(),
    ));

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        Arc::clone(&authenticator),
        system_info,
        config.session.secure_cookie,
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
