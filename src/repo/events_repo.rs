use crate::domain::event::Event;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

const EVENT_COLUMNS: &str = "id, title, description, location, category, price, currency, is_paid, max_attendees, registered_users, created_by, start_at, end_at, created_at";

#[derive(Clone)]
pub struct EventsRepo {
    pub pool: PgPool,
}

impl EventsRepo {
    pub async fn find_by_id(&self, event_id: Uuid) -> anyhow::Result<Option<Event>> {
        let row = sqlx::query(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(event_from_row))
    }

    pub async fn insert(&self, event: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events (
                id, title, description, location, category, price, currency, is_paid,
                max_attendees, registered_users, created_by, start_at, end_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(&event.category)
        .bind(event.price)
        .bind(&event.currency)
        .bind(event.is_paid)
        .bind(event.max_attendees)
        .bind(&event.registered_users)
        .bind(event.created_by)
        .bind(event.start_at)
        .bind(event.end_at)
        .bind(event.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // None if the guard fails. The row lock is held until commit.
    pub async fn register_user_tx(
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Event>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE events
            SET registered_users = array_append(registered_users, $2)
            WHERE id = $1
              AND NOT ($2 = ANY(registered_users))
              AND (max_attendees IS NULL OR max_attendees <= 0 OR cardinality(registered_users) < max_attendees)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(tx.as_mut())
        .await?;

        Ok(row.as_ref().map(event_from_row))
    }
}

pub(crate) fn event_from_row(r: &PgRow) -> Event {
    Event {
        id: r.get("id"),
        title: r.get("title"),
        description: r.get("description"),
        location: r.get("location"),
        category: r.get("category"),
        price: r.get("price"),
        currency: r.get("currency"),
        is_paid: r.get("is_paid"),
        max_attendees: r.get("max_attendees"),
        registered_users: r.get("registered_users"),
        created_by: r.get("created_by"),
        start_at: r.get("start_at"),
        end_at: r.get("end_at"),
        created_at: r.get("created_at"),
    }
}
