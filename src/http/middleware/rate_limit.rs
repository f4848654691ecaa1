use crate::domain::access::Caller;
use crate::error::ApiError;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use redis::AsyncCommands;

pub const THROTTLED: &str = "Too many registration attempts";

#[derive(Clone)]
pub struct RegistrationThrottle {
    pub redis_client: redis::Client,
    pub max_per_minute: i64,
}

pub fn exceeds_limit(count: i64, max_per_minute: i64) -> bool {
    count > max_per_minute
}

pub fn bucket_key(caller: &Caller, now: chrono::DateTime<chrono::Utc>) -> String {
    format!("register-throttle:{}:{}", caller.user_id, now.format("%Y%m%d%H%M"))
}

pub async fn enforce(
    State(state): State<RegistrationThrottle>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(caller) = request.extensions().get::<Caller>().cloned() else {
        return next.run(request).await;
    };
    let key = bucket_key(&caller, chrono::Utc::now());

    match state.redis_client.get_multiplexed_async_connection().await {
        Ok(mut conn) => {
            let count: i64 = conn.incr(&key, 1).await.unwrap_or(1);
            let _: bool = conn.expire(&key, 120).await.unwrap_or(false);
            if exceeds_limit(count, state.max_per_minute) {
                tracing::warn!(user_id = %caller.user_id, count, "registration throttled");
                return ApiError::too_many_requests(THROTTLED).into_response();
            }
        }
        Err(e) => tracing::warn!(error = %e, "throttle store unavailable, allowing request"),
    }

    next.run(request).await
}
