use anyhow::Result;
use staff_directory::application::{
    ports::{
        policy::{CapabilityPublishPolicy, PublishPolicy},
        security::TokenAuthenticator,
        time::Clock,
        util::IdGenerator,
    },
    services::{ApplicationServices, Repositories},
};
use staff_directory::config::{AppConfig, StorageBackend};
use staff_directory::infrastructure::{
    database,
    repositories::{InMemoryStore, JsonFileStore, PostgresDirectoryStore},
    security::static_token::StaticTokenAuthenticator,
    time::SystemClock,
    util::UuidIdGenerator,
};
use staff_directory::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let repos = open_repositories(&config).await?;

    let authenticator: Arc<dyn TokenAuthenticator> =
        Arc::new(StaticTokenAuthenticator::new(config.api_tokens().to_vec()));
    let policy: Arc<dyn PublishPolicy> = Arc::new(CapabilityPublishPolicy);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ids: Arc<dyn IdGenerator> = Arc::new(UuidIdGenerator);

    let services = Arc::new(ApplicationServices::new(
        repos,
        authenticator,
        policy,
        clock,
        ids,
    ));

    let state = HttpState {
        services: Arc::clone(&services),
    };

    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(backend = ?config.storage(), "listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn open_repositories(config: &AppConfig) -> Result<Repositories> {
    let repos = match config.storage() {
        StorageBackend::Memory => {
            tracing::warn!("using the in-memory backend; changes are lost on restart");
            Repositories::from_backend(Arc::new(InMemoryStore::new()))
        }
        StorageBackend::Json => {
            let store = JsonFileStore::open_dir(config.data_dir()).await?;
            tracing::info!(data_dir = %config.data_dir().display(), "opened JSON data directory");
            Repositories::from_backend(Arc::new(store))
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for postgres"))?;
            let pool = database::init_pool(url).await?;
            database::run_migrations(&pool).await?;
            Repositories::from_backend(Arc::new(PostgresDirectoryStore::new(pool)))
        }
    };
    Ok(repos)
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
