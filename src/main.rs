use event_payments::config::AppConfig;
use event_payments::http::middleware::bearer_auth::TokenVerifier;
use event_payments::http::middleware::rate_limit::RegistrationThrottle;
use event_payments::http::routes::build_router;
use event_payments::AppState;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let redis_client = redis::Client::open(cfg.redis_url.clone())?;
    let state = AppState::new(pool, redis_client.clone());
    let throttle = RegistrationThrottle {
        redis_client,
        max_per_minute: cfg.registration_attempts_per_minute,
    };

    let app = build_router(state, TokenVerifier::new(&cfg.jwt_secret), throttle);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
