use std::sync::Arc;

use auth_service::config::Config;
use auth_service::domain::auth::service::AuthorizationService;
use auth_service::domain::auth::session::SessionProvider;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::PostgresMusicianRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use auth_service::outbound::session_store::RedisSessionStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let session_config = config.jwt.session_config()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_expiration_minutes = config.jwt.access_expiration_minutes,
        refresh_expiration_minutes = config.jwt.refresh_expiration_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    let session_store = Arc::new(RedisSessionStore::connect(&config.redis.url).await?);
    tracing::info!(store = "redis", "Session store connected");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let musician_repository = Arc::new(PostgresMusicianRepository::new(pg_pool));
    let session_provider = Arc::new(SessionProvider::new(session_store, &session_config));

    let auth_service = Arc::new(AuthorizationService::new(
        user_repository,
        musician_repository,
        session_provider,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
