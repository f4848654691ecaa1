use crate::domain::analytics::{CategoryCount, CategoryRevenue, DashboardSummary, TopEvent, TrendPoint, TOP_EVENTS_LIMIT};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct AnalyticsRepo {
    pub pool: PgPool,
}

impl AnalyticsRepo {
    pub async fn dashboard(&self, since: DateTime<Utc>) -> Result<DashboardSummary> {
        let totals = sqlx::query(
            r#"
            SELECT
                (SELECT count(*) FROM events WHERE created_at >= $1) AS total_events,
                (SELECT count(*) FROM payments WHERE created_at >= $1) AS total_registrations,
                (SELECT COALESCE(SUM(amount), 0)::BIGINT FROM payments
                    WHERE created_at >= $1 AND payment_status = 'completed') AS total_revenue,
                (SELECT count(DISTINCT user_id) FROM payments WHERE created_at >= $1) AS active_users
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        let trends = sqlx::query(
            r#"
            SELECT to_char(date_trunc('day', created_at), 'YYYY-MM-DD') AS date, count(*) AS registrations
            FROM payments
            WHERE created_at >= $1
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        let categories = sqlx::query(
            r#"
            SELECT category AS name, count(*) AS value
            FROM events
            WHERE created_at >= $1
            GROUP BY category
            ORDER BY value DESC, name ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        let revenue = sqlx::query(
            r#"
            SELECT e.category AS category, COALESCE(SUM(p.amount), 0)::BIGINT AS revenue
            FROM payments p
            JOIN events e ON e.id = p.event_id
            WHERE p.created_at >= $1 AND p.payment_status = 'completed'
            GROUP BY e.category
            ORDER BY revenue DESC, category ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        let top = sqlx::query(
            r#"
            SELECT e.id, e.title, e.category,
                   cardinality(e.registered_users)::BIGINT AS registrations,
                   COALESCE((SELECT SUM(p.amount) FROM payments p
                             WHERE p.event_id = e.id AND p.payment_status = 'completed'), 0)::BIGINT AS revenue
            FROM events e
            WHERE e.created_at >= $1
            ORDER BY registrations DESC, e.title ASC
            LIMIT $2
            "#,
        )
        .bind(since)
        .bind(TOP_EVENTS_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardSummary {
            total_events: totals.get("total_events"),
            total_registrations: totals.get("total_registrations"),
            total_revenue: totals.get("total_revenue"),
            active_users: totals.get("active_users"),
            registration_trends: trends
                .into_iter()
                .map(|r| TrendPoint {
                    date: r.get("date"),
                    registrations: r.get("registrations"),
                })
                .collect(),
            category_data: categories
                .into_iter()
                .map(|r| CategoryCount {
                    name: r.get("name"),
                    value: r.get("value"),
                })
                .collect(),
            revenue_by_category: revenue
                .into_iter()
                .map(|r| CategoryRevenue {
                    category: r.get("category"),
                    revenue: r.get("revenue"),
                })
                .collect(),
            top_events: top
                .into_iter()
                .map(|r| TopEvent {
                    id: r.get("id"),
                    title: r.get("title"),
                    category: r.get("category"),
                    registrations: r.get("registrations"),
                    revenue: r.get("revenue"),
                })
                .collect(),
        })
    }
}
