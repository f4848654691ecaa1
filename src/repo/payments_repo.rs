use crate::domain::event::EventSummary;
use crate::domain::payment::{
    ContactInfo, Payment, PaymentMethod, PaymentStatus, PaymentWithEvent, PaymentWithUser, UserSummary,
};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

const UNIQUE_VIOLATION: &str = "23505";

const PAYMENT_COLUMNS: &str = r#"
    p.id, p.event_id, p.user_id, p.amount, p.currency, p.payment_method, p.payment_status,
    p.transaction_id, p.payment_date, p.contact_full_name, p.contact_email, p.contact_phone,
    p.contact_address, p.created_at, p.updated_at
"#;

#[derive(Clone)]
pub struct PaymentsRepo {
    pub pool: PgPool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Option<DateTime<Utc>>),
    DuplicateCompleted,
}

impl PaymentsRepo {
    pub async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>> {
        let row = sqlx::query(&format!("SELECT {PAYMENT_COLUMNS} FROM payments p WHERE p.id = $1"))
            .bind(payment_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(payment_from_row).transpose()
    }

    pub async fn find_completed(&self, event_id: Uuid, user_id: Uuid) -> Result<Option<Payment>> {
        let row = sqlx::query(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments p WHERE p.event_id = $1 AND p.user_id = $2 AND p.payment_status = 'completed'"
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(payment_from_row).transpose()
    }

    pub async fn insert_tx(tx: &mut Transaction<'_, Postgres>, payment: &Payment) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (
                id, event_id, user_id, amount, currency, payment_method, payment_status,
                transaction_id, payment_date, contact_full_name, contact_email, contact_phone,
                contact_address, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                $8, $9, $10, $11, $12,
                $13, $14, $15
            )
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(payment.id)
        .bind(payment.event_id)
        .bind(payment.user_id)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(payment.payment_method.as_str())
        .bind(payment.payment_status.as_str())
        .bind(&payment.transaction_id)
        .bind(payment.payment_date)
        .bind(&payment.contact_info.full_name)
        .bind(&payment.contact_info.email)
        .bind(&payment.contact_info.phone)
        .bind(payment.contact_info.address.clone())
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(tx.as_mut())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn save_status(&self, payment: &Payment) -> Result<SaveOutcome> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET payment_status = $2, transaction_id = $3,
                payment_date = COALESCE(payment_date, $4), updated_at = $5
            WHERE id = $1
            RETURNING payment_date
            "#,
        )
        .bind(payment.id)
        .bind(payment.payment_status.as_str())
        .bind(&payment.transaction_id)
        .bind(payment.payment_date)
        .bind(payment.updated_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(SaveOutcome::Saved(row.get("payment_date"))),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Ok(SaveOutcome::DuplicateCompleted)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<PaymentWithEvent>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS},
                   e.id AS ev_id, e.title AS ev_title, e.start_at AS ev_start_at,
                   e.end_at AS ev_end_at, e.location AS ev_location
            FROM payments p
            LEFT JOIN events e ON e.id = p.event_id
            WHERE p.user_id = $1
            ORDER BY p.created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| {
                let event_id: Option<Uuid> = r.get("ev_id");
                Ok(PaymentWithEvent {
                    payment: payment_from_row(r)?,
                    event: event_id.map(|id| EventSummary {
                        id,
                        title: r.get("ev_title"),
                        start_at: r.get("ev_start_at"),
                        end_at: r.get("ev_end_at"),
                        location: r.get("ev_location"),
                    }),
                })
            })
            .collect()
    }

    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<PaymentWithUser>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS},
                   u.id AS usr_id, u.name AS usr_name, u.email AS usr_email
            FROM payments p
            LEFT JOIN users u ON u.id = p.user_id
            WHERE p.event_id = $1
            ORDER BY p.created_at DESC
            "#
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| {
                let user_id: Option<Uuid> = r.get("usr_id");
                Ok(PaymentWithUser {
                    payment: payment_from_row(r)?,
                    user: user_id.map(|id| UserSummary {
                        id,
                        name: r.get("usr_name"),
                        email: r.get("usr_email"),
                    }),
                })
            })
            .collect()
    }
}

fn payment_from_row(r: &PgRow) -> Result<Payment> {
    let method: String = r.get("payment_method");
    let status: String = r.get("payment_status");

    Ok(Payment {
        id: r.get("id"),
        event_id: r.get("event_id"),
        user_id: r.get("user_id"),
        amount: r.get("amount"),
        currency: r.get("currency"),
        payment_method: PaymentMethod::parse(&method)
            .ok_or_else(|| anyhow!("unknown payment method in storage: {method}"))?,
        payment_status: PaymentStatus::parse(&status)
            .ok_or_else(|| anyhow!("unknown payment status in storage: {status}"))?,
        transaction_id: r.get("transaction_id"),
        payment_date: r.get("payment_date"),
        contact_info: ContactInfo {
            full_name: r.get("contact_full_name"),
            email: r.get("contact_email"),
            phone: r.get("contact_phone"),
            address: r.get("contact_address"),
        },
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}
