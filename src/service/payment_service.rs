use crate::domain::access::{authorize, AccessFacts, Caller, Relationship};
use crate::domain::event::Event;
use crate::domain::payment::{
    apply_status_update, placeholder_transaction_id, CheckPaidResponse, ContactInfo, EventPaymentsResponse,
    Payment, PaymentStats, PaymentStatus, PaymentWithEvent, RegisterPaidEventRequest, UpdatePaymentStatusRequest,
};
use crate::error::ApiError;
use crate::repo::events_repo::EventsRepo;
use crate::repo::payments_repo::{PaymentsRepo, SaveOutcome};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

pub const REGISTERED_MSG: &str = "Registration and payment successful!";
pub const STATUS_UPDATED_MSG: &str = "Payment status updated successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationRejection {
    EventNotFound,
    FreeEvent,
    PastEvent,
    AlreadyRegistered,
    EventFull,
    AlreadyPaid,
    IncompleteContactInfo,
}

impl RegistrationRejection {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EventNotFound => "Event not found",
            Self::FreeEvent => "This event is free. Use regular registration.",
            Self::PastEvent => "Cannot register for past events",
            Self::AlreadyRegistered => "Already registered for this event",
            Self::EventFull => "Event is full",
            Self::AlreadyPaid => "Payment already completed for this event",
            Self::IncompleteContactInfo => "Please provide complete contact information",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::EventNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<RegistrationRejection> for ApiError {
    fn from(r: RegistrationRejection) -> Self {
        ApiError::new(r.status(), r.message())
    }
}

pub fn check_registration(
    event: &Event,
    user_id: Uuid,
    has_completed_payment: bool,
    contact_info: Option<&ContactInfo>,
    now: DateTime<Utc>,
) -> Result<(), RegistrationRejection> {
    check_event_open(event, user_id, now)?;
    check_payer(has_completed_payment, contact_info)
}

pub fn check_event_open(event: &Event, user_id: Uuid, now: DateTime<Utc>) -> Result<(), RegistrationRejection> {
    if !event.requires_payment() {
        return Err(RegistrationRejection::FreeEvent);
    }
    if event.has_started(now) {
        return Err(RegistrationRejection::PastEvent);
    }
    if event.is_registered(user_id) {
        return Err(RegistrationRejection::AlreadyRegistered);
    }
    if event.is_full() {
        return Err(RegistrationRejection::EventFull);
    }
    Ok(())
}

pub fn check_payer(has_completed_payment: bool, contact_info: Option<&ContactInfo>) -> Result<(), RegistrationRejection> {
    if has_completed_payment {
        return Err(RegistrationRejection::AlreadyPaid);
    }
    if !contact_info.is_some_and(ContactInfo::is_complete) {
        return Err(RegistrationRejection::IncompleteContactInfo);
    }
    Ok(())
}

pub fn new_payment(
    event: &Event,
    user_id: Uuid,
    req: RegisterPaidEventRequest,
    now: DateTime<Utc>,
) -> Payment {
    let method = req.payment_method.unwrap_or_default();
    let status = method.initial_status();
    let transaction_id = req
        .transaction_id
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| placeholder_transaction_id(now, user_id));

    Payment {
        id: Uuid::new_v4(),
        event_id: event.id,
        user_id,
        amount: event.price,
        currency: event.currency.clone(),
        payment_method: method,
        payment_status: status,
        transaction_id,
        payment_date: (status == PaymentStatus::Completed).then_some(now),
        contact_info: req.contact_info.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub msg: &'static str,
    pub payment: Payment,
    pub event: Event,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub msg: &'static str,
    pub payment: Payment,
}

#[derive(Clone)]
pub struct PaymentService {
    pub pool: PgPool,
    pub payments_repo: PaymentsRepo,
    pub events_repo: EventsRepo,
}

impl PaymentService {
    pub async fn register_paid_event(
        &self,
        caller: &Caller,
        event_id: Uuid,
        req: RegisterPaidEventRequest,
    ) -> Result<RegistrationResponse, ApiError> {
        let user_id = caller.user_id;
        let event = self
            .events_repo
            .find_by_id(event_id)
            .await?
            .ok_or(RegistrationRejection::EventNotFound)?;

        let now = Utc::now();
        check_event_open(&event, user_id, now)?;

        let has_completed = self
            .payments_repo
            .find_completed(event_id, user_id)
            .await?
            .is_some();
        if has_completed {
            // First read may predate a concurrent registration.
            let fresh = self
                .events_repo
                .find_by_id(event_id)
                .await?
                .ok_or(RegistrationRejection::EventNotFound)?;
            check_event_open(&fresh, user_id, now)?;
        }
        check_payer(has_completed, req.contact_info.as_ref())?;

        let payment = new_payment(&event, user_id, req, now);

        let mut tx = self.pool.begin().await.map_err(|e| ApiError::internal(e.into()))?;
        let Some(updated_event) = EventsRepo::register_user_tx(&mut tx, event_id, user_id).await? else {
            tx.rollback().await.map_err(|e| ApiError::internal(e.into()))?;
            return Err(self.classify_lost_race(event_id, user_id).await?.into());
        };

        if !PaymentsRepo::insert_tx(&mut tx, &payment).await? {
            tx.rollback().await.map_err(|e| ApiError::internal(e.into()))?;
            return Err(RegistrationRejection::AlreadyPaid.into());
        }
        tx.commit().await.map_err(|e| ApiError::internal(e.into()))?;

        tracing::info!(
            event_id = %event_id,
            user_id = %user_id,
            payment_id = %payment.id,
            method = payment.payment_method.as_str(),
            status = payment.payment_status.as_str(),
            "paid registration recorded"
        );

        Ok(RegistrationResponse {
            msg: REGISTERED_MSG,
            payment,
            event: updated_event,
        })
    }

    async fn classify_lost_race(&self, event_id: Uuid, user_id: Uuid) -> Result<RegistrationRejection, ApiError> {
        let rejection = match self.events_repo.find_by_id(event_id).await? {
            None => RegistrationRejection::EventNotFound,
            Some(ev) if ev.is_registered(user_id) => RegistrationRejection::AlreadyRegistered,
            Some(_) => RegistrationRejection::EventFull,
        };
        tracing::warn!(event_id = %event_id, user_id = %user_id, reason = rejection.message(), "registration lost race");
        Ok(rejection)
    }

    pub async fn update_status(
        &self,
        caller: &Caller,
        payment_id: Uuid,
        req: UpdatePaymentStatusRequest,
    ) -> Result<StatusUpdateResponse, ApiError> {
        let mut payment = self
            .payments_repo
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Payment record not found"))?;

        let organizer = self
            .events_repo
            .find_by_id(payment.event_id)
            .await?
            .map(|e| e.created_by);
        authorize(
            caller,
            &AccessFacts {
                owner: Some(payment.user_id),
                organizer,
            },
            &[Relationship::Owner, Relationship::Organizer, Relationship::Admin],
        )?;

        let previous = payment.payment_status;
        apply_status_update(&mut payment, &req, Utc::now());

        match self.payments_repo.save_status(&payment).await? {
            SaveOutcome::Saved(stored_date) => payment.payment_date = stored_date,
            SaveOutcome::DuplicateCompleted => {
                return Err(ApiError::bad_request(RegistrationRejection::AlreadyPaid.message()))
            }
        }

        tracing::info!(
            payment_id = %payment_id,
            caller = %caller.user_id,
            from = previous.as_str(),
            to = payment.payment_status.as_str(),
            "payment status updated"
        );

        Ok(StatusUpdateResponse {
            msg: STATUS_UPDATED_MSG,
            payment,
        })
    }

    pub async fn my_payments(&self, caller: &Caller) -> Result<Vec<PaymentWithEvent>, ApiError> {
        Ok(self.payments_repo.list_for_user(caller.user_id).await?)
    }

    pub async fn event_payments(&self, caller: &Caller, event_id: Uuid) -> Result<EventPaymentsResponse, ApiError> {
        let event = self
            .events_repo
            .find_by_id(event_id)
            .await?
            .ok_or(RegistrationRejection::EventNotFound)?;

        authorize(
            caller,
            &AccessFacts {
                owner: None,
                organizer: Some(event.created_by),
            },
            &[Relationship::Organizer, Relationship::Admin],
        )?;

        let payments = self.payments_repo.list_for_event(event_id).await?;
        let stats = PaymentStats::from_payments(payments.iter().map(|p| &p.payment));
        Ok(EventPaymentsResponse { payments, stats })
    }

    pub async fn check_paid(&self, caller: &Caller, event_id: Uuid) -> Result<CheckPaidResponse, ApiError> {
        let payment = self.payments_repo.find_completed(event_id, caller.user_id).await?;
        Ok(CheckPaidResponse {
            has_paid: payment.is_some(),
            payment,
        })
    }
}
