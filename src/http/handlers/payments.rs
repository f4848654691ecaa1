use crate::domain::access::Caller;
use crate::domain::payment::{RegisterPaidEventRequest, UpdatePaymentStatusRequest};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use uuid::Uuid;

pub async fn register_paid_event(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<RegisterPaidEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(event_id) = path?;
    let Json(req) = body?;
    let resp = state
        .payment_service
        .register_paid_event(&caller, event_id, req)
        .await?;
    Ok(Json(resp))
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdatePaymentStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(payment_id) = path?;
    let Json(req) = body?;
    let resp = state
        .payment_service
        .update_status(&caller, payment_id, req)
        .await?;
    Ok(Json(resp))
}

pub async fn my_payments(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.payment_service.my_payments(&caller).await?))
}

pub async fn event_payments(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(event_id) = path?;
    Ok(Json(state.payment_service.event_payments(&caller, event_id).await?))
}

pub async fn check_paid(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(event_id) = path?;
    Ok(Json(state.payment_service.check_paid(&caller, event_id).await?))
}
