use crate::domain::access::{authorize, AccessFacts, Caller, Relationship};
use crate::domain::analytics::DashboardQuery;
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&caller, &AccessFacts::default(), &[Relationship::Admin])?;

    let Query(query) = query?;
    let days = query.window_days().map_err(ApiError::bad_request)?;
    let since = chrono::Utc::now() - chrono::Duration::days(days);

    let summary = state.analytics_repo.dashboard(since).await?;
    Ok(Json(summary))
}
