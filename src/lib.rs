pub mod client;
pub mod config;
pub mod domain {
    pub mod access;
    pub mod analytics;
    pub mod event;
    pub mod payment;
}
pub mod error;
pub mod http {
    pub mod handlers {
        pub mod analytics;
        pub mod events;
        pub mod ops;
        pub mod payments;
    }
    pub mod middleware {
        pub mod bearer_auth;
        pub mod rate_limit;
    }
    pub mod routes;
}
pub mod repo {
    pub mod analytics_repo;
    pub mod events_repo;
    pub mod payments_repo;
}
pub mod service {
    pub mod payment_service;
}

#[derive(Clone)]
pub struct AppState {
    pub payment_service: service::payment_service::PaymentService,
    pub events_repo: repo::events_repo::EventsRepo,
    pub analytics_repo: repo::analytics_repo::AnalyticsRepo,
    pub redis_client: redis::Client,
}

impl AppState {
    pub fn new(pool: sqlx::PgPool, redis_client: redis::Client) -> Self {
        let events_repo = repo::events_repo::EventsRepo { pool: pool.clone() };
        Self {
            payment_service: service::payment_service::PaymentService {
                pool: pool.clone(),
                payments_repo: repo::payments_repo::PaymentsRepo { pool: pool.clone() },
                events_repo: events_repo.clone(),
            },
            events_repo,
            analytics_repo: repo::analytics_repo::AnalyticsRepo { pool },
            redis_client,
        }
    }
}
