use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Readiness {
    pub ready: bool,
    pub db: bool,
    pub redis: bool,
}

impl Readiness {
    // Redis only backs the registration throttle, which fails open.
    pub fn from_checks(db: bool, redis: bool) -> Self {
        Self { ready: db, db, redis }
    }

    pub fn status(&self) -> StatusCode {
        if self.ready {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn database_reachable(state: &AppState) -> bool {
    sqlx::query("SELECT 1")
        .execute(&state.payment_service.pool)
        .await
        .is_ok()
}

async fn throttle_store_reachable(state: &AppState) -> bool {
    let Ok(mut conn) = state.redis_client.get_multiplexed_async_connection().await else {
        return false;
    };
    let pong: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
    pong.is_ok()
}

pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let (db, redis) = tokio::join!(database_reachable(&state), throttle_store_reachable(&state));
    let report = Readiness::from_checks(db, redis);
    if !report.ready {
        tracing::warn!(db, redis, "readiness check failed");
    }
    (report.status(), Json(report))
}

pub async fn liveness() -> impl IntoResponse {
    Json(serde_json::json!({"alive": true}))
}
