use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_WINDOW_DAYS: i64 = 30;
pub const MAX_WINDOW_DAYS: i64 = 3650;
pub const TOP_EVENTS_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSummary {
    pub total_events: i64,
    pub total_registrations: i64,
    pub total_revenue: i64,
    pub active_users: i64,
    pub registration_trends: Vec<TrendPoint>,
    pub category_data: Vec<CategoryCount>,
    pub revenue_by_category: Vec<CategoryRevenue>,
    pub top_events: Vec<TopEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPoint {
    pub date: String,
    pub registrations: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryCount {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopEvent {
    pub id: Option<Uuid>,
    pub title: String,
    pub category: String,
    pub registrations: i64,
    pub revenue: i64,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub days: Option<i64>,
}

impl DashboardQuery {
    pub fn window_days(&self) -> Result<i64, &'static str> {
        match self.days {
            None => Ok(DEFAULT_WINDOW_DAYS),
            Some(d) if (1..=MAX_WINDOW_DAYS).contains(&d) => Ok(d),
            Some(_) => Err("days must be between 1 and 3650"),
        }
    }
}
