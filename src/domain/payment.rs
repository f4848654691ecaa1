use crate::domain::event::EventSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    GPay,
    PhonePe,
    Paytm,
    #[serde(rename = "Cash on Registration")]
    CashOnRegistration,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GPay => "GPay",
            Self::PhonePe => "PhonePe",
            Self::Paytm => "Paytm",
            Self::CashOnRegistration => "Cash on Registration",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GPay" => Some(Self::GPay),
            "PhonePe" => Some(Self::PhonePe),
            "Paytm" => Some(Self::Paytm),
            "Cash on Registration" => Some(Self::CashOnRegistration),
            _ => None,
        }
    }

    pub fn is_digital(&self) -> bool {
        !matches!(self, Self::CashOnRegistration)
    }

    pub fn initial_status(&self) -> PaymentStatus {
        if self.is_digital() {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ContactInfo {
    pub fn is_complete(&self) -> bool {
        [&self.full_name, &self.email, &self.phone]
            .iter()
            .all(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub transaction_id: String,
    pub payment_date: Option<DateTime<Utc>>,
    pub contact_info: ContactInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPaidEventRequest {
    pub payment_method: Option<PaymentMethod>,
    pub contact_info: Option<ContactInfo>,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: Option<PaymentStatus>,
    pub transaction_id: Option<String>,
}

pub fn apply_status_update(payment: &mut Payment, update: &UpdatePaymentStatusRequest, now: DateTime<Utc>) {
    if let Some(status) = update.payment_status {
        payment.payment_status = status;
        if status == PaymentStatus::Completed && payment.payment_date.is_none() {
            payment.payment_date = Some(now);
        }
    }

    if let Some(txn) = update.transaction_id.as_deref().filter(|t| !t.is_empty()) {
        payment.transaction_id = txn.to_string();
    }

    payment.updated_at = now;
}

pub fn placeholder_transaction_id(now: DateTime<Utc>, user_id: Uuid) -> String {
    format!("TXN_{}_{}", now.timestamp_millis(), user_id)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub failed: usize,
    pub total_revenue: i64,
}

impl PaymentStats {
    pub fn from_payments<'a>(payments: impl IntoIterator<Item = &'a Payment>) -> Self {
        payments.into_iter().fold(Self::default(), |mut acc, p| {
            acc.total += 1;
            match p.payment_status {
                PaymentStatus::Completed => {
                    acc.completed += 1;
                    acc.total_revenue = acc.total_revenue.saturating_add(p.amount);
                }
                PaymentStatus::Pending => acc.pending += 1,
                PaymentStatus::Failed => acc.failed += 1,
            }
            acc
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWithEvent {
    #[serde(flatten)]
    pub payment: Payment,
    pub event: Option<EventSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWithUser {
    #[serde(flatten)]
    pub payment: Payment,
    pub user: Option<UserSummary>,
}

#[derive(Debug, Serialize)]
pub struct EventPaymentsResponse {
    pub payments: Vec<PaymentWithUser>,
    pub stats: PaymentStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPaidResponse {
    pub has_paid: bool,
    pub payment: Option<Payment>,
}
