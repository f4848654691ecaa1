use crate::client::ClientConfig;
use crate::domain::analytics::{DashboardSummary, TopEvent, TOP_EVENTS_LIMIT};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    pub fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    pub fn from_days(days: i64) -> Option<Self> {
        match days {
            7 => Some(Self::Week),
            30 => Some(Self::Month),
            90 => Some(Self::Quarter),
            365 => Some(Self::Year),
            _ => None,
        }
    }
}

pub struct AnalyticsClient {
    pub config: ClientConfig,
    pub client: reqwest::Client,
}

impl AnalyticsClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch(&self, range: TimeRange) -> Result<DashboardSummary> {
        let url = format!("{}/analytics/dashboard", self.config.base_url);
        let resp = self
            .client
            .get(url)
            .query(&[("days", range.days())])
            .bearer_auth(&self.config.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body: serde_json::Value = resp.json().await.unwrap_or_default();
            let message = body.get("error").and_then(|e| e.as_str()).unwrap_or("request failed");
            bail!("analytics request failed with {}: {}", status.as_u16(), message);
        }

        Ok(resp.json().await?)
    }
}

pub fn leaderboard(summary: &DashboardSummary) -> &[TopEvent] {
    let n = summary.top_events.len().min(TOP_EVENTS_LIMIT);
    &summary.top_events[..n]
}

pub fn csv_report(summary: Option<&DashboardSummary>) -> String {
    let Some(data) = summary else {
        return String::new();
    };

    let mut csv = String::from("Event Analytics Report\n\n");
    csv.push_str("Summary Statistics\n");
    let _ = writeln!(csv, "Total Events,{}", data.total_events);
    let _ = writeln!(csv, "Total Registrations,{}", data.total_registrations);
    let _ = writeln!(csv, "Total Revenue,{}", data.total_revenue);
    let _ = writeln!(csv, "Active Users,{}\n", data.active_users);

    csv.push_str("Category Breakdown\n");
    csv.push_str("Category,Count\n");
    for item in &data.category_data {
        let _ = writeln!(csv, "{},{}", item.name, item.value);
    }

    csv
}

pub fn report_file_name(date: NaiveDate) -> String {
    format!("analytics-report-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_round_trips_through_days() {
        for r in [TimeRange::Week, TimeRange::Month, TimeRange::Quarter, TimeRange::Year] {
            assert_eq!(TimeRange::from_days(r.days()), Some(r));
        }
        assert_eq!(TimeRange::default().days(), 30);
        assert_eq!(TimeRange::from_days(14), None);
    }

    #[test]
    fn leaderboard_caps_at_five() {
        let summary = DashboardSummary {
            top_events: (0..8)
                .map(|i| TopEvent {
                    title: format!("event {i}"),
                    ..TopEvent::default()
                })
                .collect(),
            ..DashboardSummary::default()
        };
        let top = leaderboard(&summary);
        assert_eq!(top.len(), 5);
        assert_eq!(top[4].title, "event 4");
    }
}
