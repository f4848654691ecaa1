use crate::http::handlers::{analytics, events, ops, payments};
use crate::http::middleware::bearer_auth::{require_caller, TokenVerifier};
use crate::http::middleware::rate_limit::{self, RegistrationThrottle};
use crate::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use axum::Router;

pub fn build_router(state: AppState, verifier: TokenVerifier, throttle: RegistrationThrottle) -> Router {
    let payment_routes = Router::new()
        .route(
            "/register-paid-event/:event_id",
            post(payments::register_paid_event)
                .layer(from_fn_with_state(throttle, rate_limit::enforce)),
        )
        .route("/update-status/:payment_id", patch(payments::update_status))
        .route("/my-payments", get(payments::my_payments))
        .route("/event/:event_id", get(payments::event_payments))
        .route("/check/:event_id", get(payments::check_paid));

    let authenticated = Router::new()
        .nest("/payments", payment_routes)
        .route("/events", post(events::create_event))
        .route("/events/:event_id", get(events::get_event))
        .route("/analytics/dashboard", get(analytics::dashboard))
        .route_layer(from_fn_with_state(verifier, require_caller));

    Router::new()
        .route("/ops/readiness", get(ops::readiness))
        .route("/ops/liveness", get(ops::liveness))
        .merge(authenticated)
        .with_state(state)
}
