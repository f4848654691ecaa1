use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub price: i64,
    pub currency: String,
    pub is_paid: bool,
    pub max_attendees: Option<i32>,
    pub registered_users: Vec<Uuid>,
    pub created_by: Uuid,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn requires_payment(&self) -> bool {
        self.is_paid && self.price > 0
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start_at < now
    }

    pub fn is_registered(&self, user_id: Uuid) -> bool {
        self.registered_users.contains(&user_id)
    }

    /// A missing or zero capacity means unlimited.
    pub fn is_full(&self) -> bool {
        match self.max_attendees {
            Some(max) if max > 0 => self.registered_users.len() >= max as usize,
            _ => false,
        }
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id,
            title: self.title.clone(),
            start_at: self.start_at,
            end_at: self.end_at,
            location: self.location.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub location: String,
}

pub const MAX_PRICE: i64 = 10_000_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub category: Option<String>,
    #[serde(default)]
    pub price: i64,
    pub currency: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
    pub max_attendees: Option<i32>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Event title is required");
        }
        if self.end_at < self.start_at {
            return Err("Event cannot end before it starts");
        }
        if self.price < 0 {
            return Err("Event price cannot be negative");
        }
        if self.price > MAX_PRICE {
            return Err("Event price is too large");
        }
        if self.max_attendees.is_some_and(|m| m < 0) {
            return Err("maxAttendees cannot be negative");
        }
        Ok(())
    }

    pub fn into_event(self, id: Uuid, created_by: Uuid, now: DateTime<Utc>) -> Event {
        Event {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            location: self.location,
            category: self.category.unwrap_or_else(|| "General".to_string()),
            price: self.price,
            currency: self.currency.unwrap_or_else(|| "INR".to_string()),
            is_paid: self.is_paid,
            max_attendees: self.max_attendees,
            registered_users: Vec::new(),
            created_by,
            start_at: self.start_at,
            end_at: self.end_at,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(max_attendees: Option<i32>, registered: usize) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            title: "Rust meetup".to_string(),
            description: String::new(),
            location: "Pune".to_string(),
            category: "Tech".to_string(),
            price: 500,
            currency: "INR".to_string(),
            is_paid: true,
            max_attendees,
            registered_users: (0..registered).map(|_| Uuid::new_v4()).collect(),
            created_by: Uuid::new_v4(),
            start_at: now + Duration::days(1),
            end_at: now + Duration::days(2),
            created_at: now,
        }
    }

    #[test]
    fn zero_or_missing_capacity_is_unlimited() {
        assert!(!event(None, 100).is_full());
        assert!(!event(Some(0), 100).is_full());
        assert!(event(Some(2), 2).is_full());
        assert!(!event(Some(3), 2).is_full());
    }

    #[test]
    fn create_request_rejects_inverted_range() {
        let now = Utc::now();
        let req = CreateEventRequest {
            title: "Workshop".to_string(),
            description: String::new(),
            location: String::new(),
            category: None,
            price: 100,
            currency: None,
            is_paid: true,
            max_attendees: None,
            start_at: now,
            end_at: now - Duration::hours(1),
        };
        assert_eq!(req.validate(), Err("Event cannot end before it starts"));
    }

    #[test]
    fn create_request_caps_price() {
        let now = Utc::now();
        let req: CreateEventRequest = serde_json::from_value(serde_json::json!({
            "title": "Gala",
            "price": i64::MAX,
            "isPaid": true,
            "startAt": now,
            "endAt": now + Duration::hours(2),
        }))
        .unwrap();
        assert_eq!(req.validate(), Err("Event price is too large"));
    }

    #[test]
    fn create_request_fills_defaults() {
        let now = Utc::now();
        let req: CreateEventRequest = serde_json::from_value(serde_json::json!({
            "title": " Workshop ",
            "price": 250,
            "isPaid": true,
            "startAt": now,
            "endAt": now + Duration::hours(2),
        }))
        .unwrap();
        let owner = Uuid::new_v4();
        let ev = req.into_event(Uuid::new_v4(), owner, now);
        assert_eq!(ev.title, "Workshop");
        assert_eq!(ev.currency, "INR");
        assert_eq!(ev.category, "General");
        assert_eq!(ev.created_by, owner);
        assert!(ev.registered_users.is_empty());
    }
}
