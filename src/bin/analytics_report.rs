use anyhow::Result;
use event_payments::client::analytics::{csv_report, leaderboard, report_file_name, AnalyticsClient, TimeRange};
use event_payments::client::ClientConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let range = std::env::var("REPORT_DAYS")
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(TimeRange::from_days)
        .unwrap_or_default();

    let client = AnalyticsClient::new(ClientConfig::from_env());
    let summary = client.fetch(range).await?;

    for (rank, event) in leaderboard(&summary).iter().enumerate() {
        tracing::info!(
            "top event #{} title={} registrations={} revenue={}",
            rank + 1,
            event.title,
            event.registrations,
            event.revenue
        );
    }

    let file_name = report_file_name(chrono::Utc::now().date_naive());
    tokio::fs::write(&file_name, csv_report(Some(&summary))).await?;
    tracing::info!(days = range.days(), file = %file_name, "analytics report written");
    Ok(())
}
